#![forbid(unsafe_code)]

//! DOM side of the carousel: element lookup, clone and pagination
//! construction, frame rendering and layout measurement.

use loopslide_core::markup::{
    ACTIVE_CLASS, CLONE_CLASS, CONTROL_BUTTON_CLASSES, INDEX_ATTRIBUTE, ROLE_ATTRIBUTE,
};
use loopslide_core::{CarouselError, ClonePlacement, RenderFrame, SlideMetrics, SlideRole, StripEdge};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement};

/// Where role markers are looked up.
#[derive(Debug, Clone)]
pub enum Scope {
    Document(Document),
    /// The root and its descendants; the root may itself carry a role.
    Element(Element),
}

impl Scope {
    fn query(&self, selector: &str) -> Result<Option<Element>, JsValue> {
        match self {
            Self::Document(doc) => doc.query_selector(selector),
            Self::Element(root) if root.matches(selector)? => Ok(Some(root.clone())),
            Self::Element(root) => root.query_selector(selector),
        }
    }
}

/// Collect every element matching `selector` under `root`, in document order.
fn query_all(root: &Element, selector: &str) -> Result<Vec<Element>, JsValue> {
    let list = root.query_selector_all(selector)?;
    let mut out = Vec::with_capacity(list.length() as usize);
    for idx in 0..list.length() {
        if let Some(el) = list.get(idx).and_then(|node| node.dyn_into::<Element>().ok()) {
            out.push(el);
        }
    }
    Ok(out)
}

fn require(scope: &Scope, role: SlideRole) -> Result<Element, JsValue> {
    scope
        .query(&role.selector())?
        .ok_or_else(|| JsValue::from_str(&CarouselError::MissingElement(role).to_string()))
}

fn set_style(el: &Element, property: &str, value: &str) -> Result<(), JsValue> {
    match el.dyn_ref::<HtmlElement>() {
        Some(html) => html.style().set_property(property, value),
        None => el.set_attribute("style", &format!("{property}: {value}")),
    }
}

/// Live handles to the carousel's elements.
#[derive(Debug)]
pub struct Dom {
    pub document: Document,
    pub wrapper: Element,
    pub list: Element,
    pub previous_button: Element,
    pub next_button: Element,
    pub controls_wrapper: Element,
    /// Slides in extended order once clones are built; originals before.
    pub items: Vec<Element>,
    pub control_buttons: Vec<Element>,
}

impl Dom {
    /// Locate the host page's required elements under `scope`.
    ///
    /// The first missing role, in [`SlideRole::REQUIRED`] order, is reported.
    pub fn locate(document: Document, scope: &Scope) -> Result<Self, JsValue> {
        let [wrapper, list, previous_button, next_button, controls_wrapper] =
            SlideRole::REQUIRED.map(|role| require(scope, role));
        let wrapper = wrapper?;
        let list = list?;
        let previous_button = previous_button?;
        let next_button = next_button?;
        let controls_wrapper = controls_wrapper?;
        let items = query_all(&list, &SlideRole::Item.selector())?;
        Ok(Self {
            document,
            wrapper,
            list,
            previous_button,
            next_button,
            controls_wrapper,
            items,
            control_buttons: Vec::new(),
        })
    }

    /// Number of original slides found on the page.
    #[must_use]
    pub fn original_count(&self) -> usize {
        self.items.len()
    }

    /// Append one pagination button per original slide.
    pub fn build_controls(&mut self, count: usize) -> Result<(), JsValue> {
        for _ in 0..count {
            let button = self.document.create_element("button")?;
            for class in CONTROL_BUTTON_CLASSES {
                button.class_list().add_1(class)?;
            }
            button.set_attribute(ROLE_ATTRIBUTE, SlideRole::ControlButton.marker())?;
            self.controls_wrapper.append_with_node_1(&button)?;
            self.control_buttons.push(button);
        }
        Ok(())
    }

    /// Stamp ordinals on the originals, insert the boundary clones, and
    /// re-read the slide list in extended order.
    pub fn build_clones(&mut self, plan: &[ClonePlacement]) -> Result<(), JsValue> {
        for (idx, item) in self.items.iter().enumerate() {
            item.set_attribute(INDEX_ATTRIBUTE, &idx.to_string())?;
        }
        for placement in plan {
            let Some(source) = self.items.get(placement.source) else {
                return Err(JsValue::from_str("clone source slide missing"));
            };
            let clone: Element = source.clone_node_with_deep(true)?.dyn_into()?;
            clone.class_list().add_1(CLONE_CLASS)?;
            clone.set_attribute(INDEX_ATTRIBUTE, &placement.ordinal.to_string())?;
            match placement.edge {
                StripEdge::Back => self.list.append_with_node_1(&clone)?,
                StripEdge::Front => self.list.prepend_with_node_1(&clone)?,
            }
        }
        self.items = query_all(&self.list, &SlideRole::Item.selector())?;
        Ok(())
    }

    /// Elements carrying `role`, paired with their index in carousel space.
    #[must_use]
    pub fn elements_for(&self, role: SlideRole) -> Vec<(usize, Element)> {
        let single = |el: &Element| vec![(0, el.clone())];
        match role {
            SlideRole::Item => self.items.iter().cloned().enumerate().collect(),
            SlideRole::ControlButton => self.control_buttons.iter().cloned().enumerate().collect(),
            SlideRole::Wrapper => single(&self.wrapper),
            SlideRole::List => single(&self.list),
            SlideRole::NavPreviousButton => single(&self.previous_button),
            SlideRole::NavNextButton => single(&self.next_button),
            SlideRole::ControlsWrapper => single(&self.controls_wrapper),
        }
    }

    /// Reflect `frame`, skipping properties unchanged since `previous`.
    pub fn render(&self, frame: &RenderFrame, previous: Option<&RenderFrame>) -> Result<(), JsValue> {
        // Transition must be set before the transform it governs.
        if previous.is_none_or(|p| p.animate != frame.animate) {
            set_style(&self.list, "transition", frame.transition_css())?;
        }
        if previous.is_none_or(|p| p.offset != frame.offset) {
            set_style(&self.list, "transform", &frame.transform_css())?;
        }
        if previous.is_none_or(|p| p.active_control != frame.active_control) {
            for button in &self.control_buttons {
                button.class_list().remove_1(ACTIVE_CLASS)?;
            }
            if let Some(button) = frame
                .active_control
                .and_then(|idx| self.control_buttons.get(idx))
            {
                button.class_list().add_1(ACTIVE_CLASS)?;
            }
        }
        Ok(())
    }
}

impl SlideMetrics for Dom {
    fn viewport_width(&self) -> f64 {
        self.document
            .body()
            .map_or(0.0, |body| f64::from(body.client_width()))
    }

    fn slide_width(&self, index: usize) -> f64 {
        self.items
            .get(index)
            .map_or(0.0, |item| f64::from(item.client_width()))
    }
}
