//! Browser glue: canvas mounting and the swatch elements of the page.

use wasm_bindgen::{JsCast, closure::Closure};
use winit::{event_loop::EventLoopProxy, platform::web::WindowExtWebSys, window::Window};

use crate::{
    app::ViewerEvent,
    config::{SwatchConfig, ViewerConfig},
    data_structures::color::Color,
    error::ViewerError,
    interaction::SwatchPicker,
};

fn document() -> Option<web_sys::Document> {
    web_sys::window().and_then(|window| window.document())
}

/// Append the window's canvas to the element with id `mount_id`.
pub fn mount_canvas(window: &Window, mount_id: &str) -> Result<(), ViewerError> {
    let container = document()
        .and_then(|document| document.get_element_by_id(mount_id))
        .ok_or_else(|| ViewerError::MountPointMissing(mount_id.to_string()))?;
    let canvas = window
        .canvas()
        .ok_or_else(|| ViewerError::Gpu("the window has no canvas".to_string()))?;
    // Let the container decide the size, winit reports the resulting resizes
    canvas
        .set_attribute("style", "width: 100%; height: 100%; display: block;")
        .and_then(|_| container.append_child(&canvas).map(|_| ()))
        .map_err(|e| ViewerError::Gpu(format!("couldn't attach canvas: {:?}", e)))
}

/// The swatch elements found in the page, in document order.
#[derive(Debug)]
pub struct DomSwatches {
    elements: Vec<web_sys::Element>,
    active_class: String,
}

impl DomSwatches {
    /// Find all `.<swatch_class>[data-color]` elements and forward their clicks
    /// to the event loop. Elements whose color can't be parsed are skipped.
    ///
    /// The picker starts with whichever element carries the active class.
    pub fn bind(config: &ViewerConfig, proxy: &EventLoopProxy<ViewerEvent>) -> (Self, SwatchPicker) {
        let mut elements = Vec::new();
        let mut swatches = Vec::new();
        let mut active = None;

        let selector = format!(".{}[data-color]", config.swatch_class);
        let nodes = document().and_then(|document| document.query_selector_all(&selector).ok());
        let Some(nodes) = nodes else {
            log::warn!("no swatches found for {}", selector);
            return (
                Self {
                    elements,
                    active_class: config.active_class.clone(),
                },
                SwatchPicker::default(),
            );
        };

        for i in 0..nodes.length() {
            let Some(element) = nodes
                .get(i)
                .and_then(|node| node.dyn_into::<web_sys::Element>().ok())
            else {
                continue;
            };
            let value = element.get_attribute("data-color").unwrap_or_default();
            let color = match value.parse::<Color>() {
                Ok(color) => color,
                Err(e) => {
                    log::warn!("ignoring swatch: {}", e);
                    continue;
                }
            };

            let index = swatches.len();
            let proxy = proxy.clone();
            let on_click = Closure::<dyn FnMut()>::new(move || {
                if proxy.send_event(ViewerEvent::SwatchClicked(index)).is_err() {
                    log::warn!("swatch click after the event loop closed");
                }
            });
            if let Err(e) =
                element.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            {
                log::warn!("couldn't listen to swatch {}: {:?}", index, e);
                continue;
            }
            // The listener lives as long as the page
            on_click.forget();

            if active.is_none() && element.class_list().contains(&config.active_class) {
                active = Some(index);
            }
            let label = element.text_content().unwrap_or_default();
            swatches.push(SwatchConfig::new(label.trim(), color));
            elements.push(element);
        }
        log::info!("bound {} swatches", elements.len());

        (
            Self {
                elements,
                active_class: config.active_class.clone(),
            },
            SwatchPicker::new(swatches, active),
        )
    }

    /// Mirror the picker state in the active class of the elements.
    pub fn sync(&self, picker: &SwatchPicker) {
        let marked = self
            .elements
            .iter()
            .map(|element| element.class_list().contains(&self.active_class));
        for (i, add) in picker.class_updates(marked) {
            let classes = self.elements[i].class_list();
            let result = if add {
                classes.add_1(&self.active_class)
            } else {
                classes.remove_1(&self.active_class)
            };
            if let Err(e) = result {
                log::warn!("couldn't update swatch {}: {:?}", i, e);
            }
        }
    }
}
