#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod components;
mod viewer;

use abstutil::Timer;
use anyhow::Result;
use geom::Bounds;
use structopt::StructOpt;
use widgetry::{Color, EventCtx, GfxCtx, Settings, SharedAppState};

use model::{Model, TimeFilter};

#[derive(StructOpt)]
struct Args {
    /// The path to a previously built and serialized model
    #[structopt(long)]
    model: Option<String>,
    /// The path to a GBFS-style station information JSON file
    #[structopt(long)]
    stations: Option<String>,
    /// The path to a trip log CSV file
    #[structopt(long)]
    trips: Option<String>,
    /// Paths to GeoJSON files with bike lane networks to draw underneath the
    /// stations. Can be repeated.
    #[structopt(long)]
    lanes: Vec<String>,
}

impl Args {
    // TODO These args only make sense on native, because they read files
    fn load(mut self, timer: &mut Timer) -> Result<Model> {
        if let Some(path) = self.model.take() {
            if self.stations.is_some() || self.trips.is_some() || !self.lanes.is_empty() {
                bail!("If --model is specified, nothing will be imported");
            }
            return abstio::maybe_read_binary::<Model>(path, timer);
        }
        if self.stations.is_none() && self.trips.is_none() {
            // The web entry point starts without any data
            return Ok(Model::empty());
        }
        if self.stations.is_none() || self.trips.is_none() {
            bail!("Both --stations and --trips are needed to import");
        }
        let model = Model::import(
            &self.stations.take().unwrap(),
            &self.trips.take().unwrap(),
            &self.lanes,
        )?;
        abstio::write_binary("model.bin".to_string(), &model);
        info!("Cached the imported model to model.bin");
        Ok(model)
    }
}

fn run(settings: Settings) {
    abstutil::logger::setup();

    let args = Args::from_iter(abstutil::cli_args());

    widgetry::run(settings, move |ctx| {
        let model = ctx.loading_screen("initialize model", |_, timer| args.load(timer).unwrap());
        let mut app = App::new(ctx, model);
        let states = vec![viewer::Viewer::new_state(ctx, &mut app)];
        (app, states)
    });
}

pub fn main() {
    run(Settings::new("Dock Spotting"));
}

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn run_wasm() {
    run(Settings::new("Dock Spotting").root_dom_element_id("loading".to_string()));
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = window)]
    fn sync_mapbox_canvas(lon1: f64, lat1: f64, lon2: f64, lat2: f64);
}

pub struct App {
    model: Model,
    time_filter: TimeFilter,

    // Avoid syncing when bounds match
    #[allow(unused)]
    mapbox_bounds: Bounds,
}

impl SharedAppState for App {
    fn draw_default(&self, g: &mut GfxCtx) {
        // On the web, the Mapbox basemap shows through behind the canvas
        if cfg!(not(target_arch = "wasm32")) {
            g.clear(Color::BLACK);
        }
    }
}

pub type Transition = widgetry::Transition<App>;

impl App {
    pub fn new(ctx: &mut EventCtx, model: Model) -> Self {
        let bounds = &model.bounds;
        ctx.canvas.map_dims = (bounds.max_x, bounds.max_y);
        ctx.canvas.center_on_map_pt(bounds.center());

        Self {
            model,
            time_filter: TimeFilter::Any,
            mapbox_bounds: Bounds::new(),
        }
    }

    #[allow(unused)]
    pub fn sync_mapbox(&mut self, ctx: &mut EventCtx) {
        #[cfg(target_arch = "wasm32")]
        {
            // This is called for every event, but the camera hasn't always
            // moved
            let bounds = ctx.canvas.get_screen_bounds();
            if self.mapbox_bounds == bounds {
                return;
            }
            self.mapbox_bounds = bounds;

            let pt1 = geom::Pt2D::new(bounds.min_x, bounds.min_y).to_gps(&self.model.gps_bounds);
            let pt2 = geom::Pt2D::new(bounds.max_x, bounds.max_y).to_gps(&self.model.gps_bounds);
            sync_mapbox_canvas(pt1.x(), pt1.y(), pt2.x(), pt2.y());
        }
    }
}
