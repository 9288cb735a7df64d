use widgetry::{EventCtx, Panel, Slider, Widget};

use model::TimeFilter;

// The leftmost slider position means "don't filter at all"; the rest of the
// travel maps to minutes since midnight.

pub fn to_controls(ctx: &mut EventCtx, filter: TimeFilter) -> Widget {
    let percent = match filter {
        TimeFilter::Any => 0.0,
        TimeFilter::Near(minute) => f64::from(minute + 1) / 1440.0,
    };
    Slider::area(ctx, 0.25 * ctx.canvas.window_width, percent, "time of day")
}

pub fn from_controls(panel: &Panel) -> TimeFilter {
    let value = (panel.slider("time of day").get_percent() * 1440.0).round() as i32 - 1;
    if value < 0 {
        TimeFilter::Any
    } else {
        TimeFilter::Near(value as u16)
    }
}
