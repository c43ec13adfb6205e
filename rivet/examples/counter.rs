//! Wires every `<div data-mounts="counter">` on the page:
//!
//! ```html
//! <div data-mounts="counter" data-props='{"start": 5, "step": 2}'>
//!   <output data-ref="value">5</output>
//!   <button data-ref="step">+</button>
//!   <button data-ref="step">-</button>
//! </div>
//! ```

use std::{cell::Cell, rc::Rc};

use rivet::RefValue;
use serde::Deserialize;
use wasm_bindgen::{prelude::*, JsCast};

#[derive(Deserialize)]
struct Counter {
    #[serde(default)]
    start: i64,
    #[serde(default = "one")]
    step: i64,
}

fn one() -> i64 {
    1
}

fn main() {
    rivet::mount("counter", |_root, props, refs| {
        let Ok(config) = props.deserialize::<Counter>() else {
            return;
        };
        let Some(value) = refs.one("value").cloned() else {
            return;
        };

        let count = Rc::new(Cell::new(config.start));
        value.set_text_content(Some(&config.start.to_string()));

        // first button increments, any further ones decrement
        let buttons = match refs.get("step") {
            Some(RefValue::Single(button)) => vec![button.clone()],
            Some(RefValue::Many(buttons)) => buttons.clone(),
            None => vec![],
        };

        for (i, button) in buttons.into_iter().enumerate() {
            let delta = if i == 0 { config.step } else { -config.step };
            let (count, value) = (count.clone(), value.clone());
            let closure = Closure::<dyn Fn()>::new(move || {
                count.set(count.get() + delta);
                value.set_text_content(Some(&count.get().to_string()));
            });
            button
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
                .unwrap();
            closure.forget();
        }
    })
    .unwrap();
}
