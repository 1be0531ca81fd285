use thiserror::Error;

pub type PlotResult<T> = Result<T, PlotError>;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("unknown plot type: `{0}`")]
    UnknownPlotType(String),

    #[error("plot type `{plot_type}` has no geometry mapping for `{name}`")]
    UnknownGeometry { plot_type: String, name: String },

    #[error("missing required option `{0}`")]
    MissingOption(String),

    #[error("invalid option `{path}`: {reason}")]
    InvalidOption { path: String, reason: String },

    #[error("component factory does not provide `{0}` components")]
    UnsupportedComponent(String),

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("stage `{requested}` cannot run before `{required}`")]
    InvalidStage {
        requested: &'static str,
        required: &'static str,
    },

    #[error("collaborator failure: {0}")]
    Collaborator(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
