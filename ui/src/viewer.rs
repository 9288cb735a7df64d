use abstutil::prettyprint_usize;
use geom::{Circle, Distance};
use widgetry::mapspace::{ObjectID, World};
use widgetry::tools::{ColorLegend, ColorScale};
use widgetry::{
    Color, EventCtx, GeomBatch, GfxCtx, HorizontalAlignment, Line, Outcome, Panel, State, Text,
    TextExt, VerticalAlignment, Widget,
};

use bikeshare::StationID;
use model::{compute_station_traffic, departure_ratio_bucket, filter_trips, RadiusScale};

use crate::components::{describe, time_slider};
use crate::{App, Transition};

// One radius step from the scale, in map-space meters
const METERS_PER_RADIUS_STEP: f64 = 10.0;

pub struct Viewer {
    panel: Panel,
    world: World<Obj>,
}

impl Viewer {
    pub fn new_state(ctx: &mut EventCtx, app: &mut App) -> Box<dyn State<App>> {
        let panel = Panel::new_builder(Widget::col(vec![
            Line("Dock Spotting").small_heading().into_widget(ctx),
            Widget::row(vec![
                "Filter by time:".text_widget(ctx),
                time_slider::to_controls(ctx, app.time_filter),
            ]),
            Widget::placeholder(ctx, "clock"),
            Widget::placeholder(ctx, "legend"),
            Widget::placeholder(ctx, "stats"),
        ]))
        .aligned(HorizontalAlignment::Left, VerticalAlignment::Top)
        .build(ctx);

        let mut state = Self {
            panel,
            world: World::unbounded(),
        };
        state.on_filter_change(ctx, app);
        Box::new(state)
    }

    // The whole pipeline: filter trips, recount traffic, rebuild the scales
    // and the drawn world.
    fn on_filter_change(&mut self, ctx: &mut EventCtx, app: &mut App) {
        let trips = filter_trips(&app.model.trips, app.time_filter);
        compute_station_traffic(&mut app.model.stations, &trips);

        let clock = Text::from(Line(app.time_filter.describe()).big_monospaced()).into_widget(ctx);
        self.panel.replace(ctx, "clock", clock);

        let flow_colors = flow_color_scale();
        let legend = ColorLegend::gradient(
            ctx,
            &flow_colors,
            vec![
                "departure-heavy".to_string(),
                "balanced".to_string(),
                "arrival-heavy".to_string(),
            ],
        );
        self.panel.replace(ctx, "legend", legend);

        let busiest = app
            .model
            .stations
            .iter()
            .map(|s| s.total_traffic)
            .max()
            .unwrap_or(0);
        let stats = Text::from_multiline(vec![
            Line(format!(
                "{} / {} trips match",
                prettyprint_usize(trips.len()),
                prettyprint_usize(app.model.trips.len())
            )),
            Line(format!(
                "{} stations",
                prettyprint_usize(app.model.stations.len())
            )),
            Line(format!(
                "Busiest station: {} trips",
                prettyprint_usize(busiest)
            )),
        ])
        .into_widget(ctx);
        self.panel.replace(ctx, "stats", stats);

        self.world = make_world(ctx, app, &flow_colors);
    }
}

impl State<App> for Viewer {
    fn event(&mut self, ctx: &mut EventCtx, app: &mut App) -> Transition {
        ctx.canvas_movement();
        app.sync_mapbox(ctx);

        // Panning and zooming never re-aggregate; hovering is all the world
        // handles here
        self.world.event(ctx);

        match self.panel.event(ctx) {
            Outcome::Changed(x) => match x.as_ref() {
                "time of day" => {
                    app.time_filter = time_slider::from_controls(&self.panel);
                    self.on_filter_change(ctx, app);
                }
                _ => unreachable!(),
            },
            _ => {}
        }

        Transition::Keep
    }

    fn draw(&self, g: &mut GfxCtx, _: &App) {
        self.panel.draw(g);
        self.world.draw(g);
    }

    fn recreate(&mut self, ctx: &mut EventCtx, app: &mut App) -> Box<dyn State<App>> {
        Self::new_state(ctx, app)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Obj {
    Station(StationID),
}
impl ObjectID for Obj {}

fn make_world(ctx: &mut EventCtx, app: &App, flow_colors: &ColorScale) -> World<Obj> {
    let mut world = World::bounded(&app.model.bounds);

    // Bike lanes go under everything else
    let mut batch = GeomBatch::new();
    batch.push(Color::grey(0.1), app.model.bounds.get_rectangle());
    for lane in &app.model.bike_lanes {
        batch.push(
            Color::GREEN.alpha(0.6),
            lane.make_polygons(Distance::meters(5.0)),
        );
    }
    world.draw_master_batch(ctx, batch);

    let radius_scale = RadiusScale::new(&app.model.stations, app.time_filter);

    for station in &app.model.stations {
        let radius = radius_scale.radius(station.total_traffic);
        // An invisible dot shouldn't swallow hover events
        if radius == 0.0 {
            continue;
        }
        let circle = Circle::new(
            station.pos,
            Distance::meters(METERS_PER_RADIUS_STEP * radius),
        );
        let hitbox = circle.to_polygon();

        let mut batch = GeomBatch::new();
        // The orange end of the ramp is departure-heavy
        let color = flow_colors.eval(1.0 - departure_ratio_bucket(station));
        batch.push(color.alpha(0.6), hitbox.clone());
        if let Ok(outline) = circle.to_outline(Distance::meters(2.0)) {
            batch.push(Color::WHITE, outline);
        }

        world
            .add(Obj::Station(station.id))
            .hitbox(hitbox)
            .draw(batch)
            .hover_alpha(0.5)
            .tooltip(describe::station(station))
            .build(ctx);
    }

    world.initialize_hover(ctx);
    world
}

fn flow_color_scale() -> ColorScale {
    ColorScale::from_colorous(colorous::PURPLE_ORANGE)
}
