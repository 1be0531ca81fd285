use crate::interaction::EventMapping;

pub static SCATTER_EVENTS: &[EventMapping] = &[
    EventMapping::new("onPointClick", "point:click"),
    EventMapping::new("onPointDblclick", "point:dblclick"),
    EventMapping::new("onPointMousemove", "point:mousemove"),
    EventMapping::new("onPointMouseenter", "point:mouseenter"),
    EventMapping::new("onPointMouseleave", "point:mouseleave"),
    EventMapping::new("onPointContextmenu", "point:contextmenu"),
    EventMapping::new("onPlotClick", "plot:click"),
    EventMapping::new("onPlotDblclick", "plot:dblclick"),
    EventMapping::new("onPlotMousemove", "plot:mousemove"),
    EventMapping::new("onPlotContextmenu", "plot:contextmenu"),
    EventMapping::new("onLegendClick", "legend:click"),
];
