use crate::interaction::EventMapping;

/// Handler keys accepted under `events` for column plots.
pub static COLUMN_EVENTS: &[EventMapping] = &[
    EventMapping::new("onColumnClick", "interval:click"),
    EventMapping::new("onColumnDblclick", "interval:dblclick"),
    EventMapping::new("onColumnMousemove", "interval:mousemove"),
    EventMapping::new("onColumnMouseenter", "interval:mouseenter"),
    EventMapping::new("onColumnMouseleave", "interval:mouseleave"),
    EventMapping::new("onColumnMousedown", "interval:mousedown"),
    EventMapping::new("onColumnMouseup", "interval:mouseup"),
    EventMapping::new("onColumnContextmenu", "interval:contextmenu"),
    EventMapping::new("onPlotClick", "plot:click"),
    EventMapping::new("onPlotDblclick", "plot:dblclick"),
    EventMapping::new("onPlotMousemove", "plot:mousemove"),
    EventMapping::new("onPlotMouseenter", "plot:mouseenter"),
    EventMapping::new("onPlotMouseleave", "plot:mouseleave"),
    EventMapping::new("onPlotContextmenu", "plot:contextmenu"),
    EventMapping::new("onLabelClick", "label:click"),
    EventMapping::new("onLabelMousemove", "label:mousemove"),
    EventMapping::new("onLegendClick", "legend:click"),
    EventMapping::new("onAxisLabelClick", "axis-label:click"),
];
