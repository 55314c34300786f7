#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod components;
pub mod core;
pub mod geom;
pub mod parse;

use std::fmt;

use components::value::Value;
use components::{ComponentRegistry, OutputMap};
use serde::Serialize;
use wasm_bindgen::JsError;
use wasm_bindgen::prelude::*;

use crate::core::{Aggregation, PartCatalog};

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            // no-op fallback when panic hook is disabled
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    log::set_logger(&DEFAULT_LOGGER).expect("error initializing logger");
    log::set_max_level(LevelFilter::Debug);
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {
    // no-op fallback when debug logs are disabled
}

#[macro_export]
macro_rules! debug_log {
    ($($t:tt)*) => {{
        #[cfg(feature = "debug_logs")]
        {
            #[cfg(target_arch = "wasm32")]
            {
                ::web_sys::console::log_1(&::wasm_bindgen::JsValue::from_str(&format!($($t)*)));
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                println!("{}", format!($($t)*));
            }
        }
    }};
}

/// Export van de geëxtraheerde graaf richting JS-consumenten. De edge-
/// en indexvelden zijn lijsten-van-lijsten, met één sublijst per part.
#[derive(Debug, Default, Serialize)]
struct GraphExport {
    nodes: Vec<[f64; 3]>,
    edges: Vec<Vec<LineExport>>,
    edge_start_ids: Vec<Vec<usize>>,
    edge_end_ids: Vec<Vec<usize>>,
    conn_start_ids: Vec<Vec<usize>>,
    conn_end_ids: Vec<Vec<usize>>,
}

#[derive(Debug, Serialize)]
struct LineExport {
    start: [f64; 3],
    end: [f64; 3],
}

/// Public entry point for consumers.
#[wasm_bindgen]
pub struct Engine {
    initialized: bool,
    registry: ComponentRegistry,
    aggregation: Option<Aggregation>,
    catalog: Option<PartCatalog>,
    last_graph: Option<OutputMap>,
}

#[wasm_bindgen]
impl Engine {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Engine {
        Engine {
            initialized: true,
            registry: ComponentRegistry::default(),
            aggregation: None,
            catalog: None,
            last_graph: None,
        }
    }

    /// Geeft terug of de engine de minimale initialisatie heeft doorlopen.
    #[wasm_bindgen]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Laad een aggregatiedocument (JSON) in de engine.
    #[wasm_bindgen]
    pub fn load_aggregation(&mut self, json: &str) -> Result<(), JsValue> {
        let aggregation = parse::aggregation_json::parse_str(json).map_err(to_js_error)?;
        debug_log!("aggregatie geladen: {} parts", aggregation.part_count());

        self.aggregation = Some(aggregation);
        self.last_graph = None;
        Ok(())
    }

    /// Aantal parts in de geladen aggregatie.
    #[wasm_bindgen]
    pub fn part_count(&self) -> usize {
        self.aggregation.as_ref().map_or(0, Aggregation::part_count)
    }

    /// Extraheer de connectiviteitsgraaf van de geladen aggregatie. De
    /// optionele `half_edge` toggle (standaard true) bepaalt of iedere
    /// match vanuit beide parts wordt vastgelegd.
    #[wasm_bindgen]
    pub fn extract_graph(&mut self, half_edge: Option<bool>) -> Result<(), JsValue> {
        let aggregation = self
            .aggregation
            .as_ref()
            .ok_or_else(|| js_error("er is geen aggregatie geladen"))?;

        let component = self
            .registry
            .resolve("AggregationGraph")
            .ok_or_else(|| js_error("component AggregationGraph is niet geregistreerd"))?;

        let inputs = vec![
            Value::Aggregation(aggregation.clone()),
            Value::Boolean(half_edge.unwrap_or(true)),
        ];
        let outputs = component.evaluate(&inputs).map_err(to_js_error)?;

        self.last_graph = Some(outputs);
        Ok(())
    }

    /// Aantal nodes in de laatst geëxtraheerde graaf.
    #[wasm_bindgen]
    pub fn graph_node_count(&self) -> Result<usize, JsValue> {
        let outputs = self.require_graph()?;
        pin_list(outputs, "N")
            .map(|nodes| nodes.len())
            .map_err(|err| js_error(&err))
    }

    /// Totaal aantal edges in de laatst geëxtraheerde graaf.
    #[wasm_bindgen]
    pub fn graph_edge_count(&self) -> Result<usize, JsValue> {
        let outputs = self.require_graph()?;
        let mut total = 0;
        for sublist in pin_list(outputs, "E").map_err(|err| js_error(&err))? {
            total += sublist
                .expect_list()
                .map_err(|err| js_error(&err.to_string()))?
                .len();
        }
        Ok(total)
    }

    /// Haal de volledige graaf op als JS-object.
    #[wasm_bindgen]
    pub fn get_graph(&self) -> Result<JsValue, JsValue> {
        let outputs = self.require_graph()?;
        let export = graph_export(outputs).map_err(|err| js_error(&err))?;
        serde_wasm_bindgen::to_value(&export).map_err(|err| JsError::new(&err.to_string()).into())
    }

    /// Bouw een catalogus uit een partsdocument en een lijst aantallen.
    /// Eén enkel aantal geldt voor ieder parttype.
    #[wasm_bindgen]
    pub fn build_catalog(&mut self, json: &str, amounts: Vec<i32>) -> Result<(), JsValue> {
        let document = parse::aggregation_json::parse_str(json).map_err(to_js_error)?;

        let component = self
            .registry
            .resolve("PartCat")
            .ok_or_else(|| js_error("component PartCat is niet geregistreerd"))?;

        let inputs = vec![
            Value::List(
                document
                    .parts()
                    .iter()
                    .cloned()
                    .map(Value::Part)
                    .collect(),
            ),
            Value::List(
                amounts
                    .into_iter()
                    .map(|amount| Value::Number(f64::from(amount)))
                    .collect(),
            ),
        ];
        let mut outputs = component.evaluate(&inputs).map_err(to_js_error)?;

        match outputs.remove("CAT") {
            Some(Value::Catalog(catalog)) => {
                debug_log!("catalogus gebouwd: {} exemplaren", catalog.total());
                self.catalog = Some(catalog);
                Ok(())
            }
            _ => Err(js_error("Parts Catalog leverde geen catalogus op")),
        }
    }

    /// Totaal aantal nog beschikbare exemplaren in de catalogus.
    #[wasm_bindgen]
    pub fn catalog_total(&self) -> usize {
        self.catalog.as_ref().map_or(0, PartCatalog::total)
    }

    /// Resterend aantal voor één parttype, of `None` als het type
    /// onbekend is.
    #[wasm_bindgen]
    pub fn catalog_remaining(&self, name: &str) -> Option<usize> {
        self.catalog.as_ref()?.remaining(name)
    }

    /// Trek gewogen-willekeurig een parttype uit de catalogus en verbruik
    /// één exemplaar. Geeft `None` zodra de catalogus is uitgeput.
    #[wasm_bindgen]
    pub fn draw_part(&mut self) -> Option<String> {
        let catalog = self.catalog.as_mut()?;
        let mut rng = rand::rng();
        catalog.draw(&mut rng)
    }
}

impl Engine {
    fn require_graph(&self) -> Result<&OutputMap, JsValue> {
        self.last_graph
            .as_ref()
            .ok_or_else(|| js_error("graaf is nog niet geëxtraheerd"))
    }
}

fn pin_list<'a>(outputs: &'a OutputMap, pin: &str) -> Result<&'a [Value], String> {
    outputs
        .get(pin)
        .ok_or_else(|| format!("uitvoerpin `{pin}` ontbreekt"))?
        .expect_list()
        .map_err(|err| err.to_string())
}

fn nested_indices(outputs: &OutputMap, pin: &str) -> Result<Vec<Vec<usize>>, String> {
    pin_list(outputs, pin)?
        .iter()
        .map(|sublist| {
            sublist
                .expect_list()
                .map_err(|err| err.to_string())?
                .iter()
                .map(|value| {
                    value
                        .expect_number()
                        .map(|number| number as usize)
                        .map_err(|err| err.to_string())
                })
                .collect()
        })
        .collect()
}

fn graph_export(outputs: &OutputMap) -> Result<GraphExport, String> {
    let nodes = pin_list(outputs, "N")?
        .iter()
        .map(|value| value.expect_point().map_err(|err| err.to_string()))
        .collect::<Result<Vec<_>, _>>()?;

    let edges = pin_list(outputs, "E")?
        .iter()
        .map(|sublist| {
            sublist
                .expect_list()
                .map_err(|err| err.to_string())?
                .iter()
                .map(|value| {
                    let (start, end) = value.expect_curve_line().map_err(|err| err.to_string())?;
                    Ok(LineExport { start, end })
                })
                .collect::<Result<Vec<_>, String>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(GraphExport {
        nodes,
        edges,
        edge_start_ids: nested_indices(outputs, "ES_ID")?,
        edge_end_ids: nested_indices(outputs, "EE_ID")?,
        conn_start_ids: nested_indices(outputs, "CS_ID")?,
        conn_end_ids: nested_indices(outputs, "CE_ID")?,
    })
}

fn to_js_error<E: fmt::Display>(error: E) -> JsValue {
    js_error(&error.to_string())
}

fn js_error(message: &str) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    {
        JsError::new(message).into()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        JsValue::NULL
    }
}
