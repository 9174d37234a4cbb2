//! Per-request state consumed by layout resolution

use crate::resource::{ResourceRef, resource_path};
use crate::types::TypeTag;
use serde_json::{Map, Value};

/// Template data accumulated for a request
pub type LayoutData = Map<String, Value>;

/// Default host used by [`Request::resource_url`]
pub const DEFAULT_HOST_URL: &str = "http://localhost";

/// A request being answered
///
/// The request owns its `layout_data` bag; views may populate it before the
/// layouts are rendered and layout views merge into it while the chain is
/// folded.
#[derive(Debug)]
pub struct Request {
    root: ResourceRef,
    context: ResourceRef,
    request_type: Option<TypeTag>,
    view: Option<String>,
    layout: Option<String>,
    host_url: String,
    layout_data: LayoutData,
}

impl Request {
    pub fn new(root: ResourceRef, context: ResourceRef) -> Self {
        Self {
            root,
            context,
            request_type: None,
            view: None,
            layout: None,
            host_url: DEFAULT_HOST_URL.to_string(),
            layout_data: LayoutData::new(),
        }
    }

    /// Set the request type (usually a route request type)
    pub fn with_request_type(mut self, request_type: TypeTag) -> Self {
        self.request_type = Some(request_type);
        self
    }

    /// Set the name of the active top-level view
    pub fn with_view(mut self, view: impl Into<String>) -> Self {
        self.view = Some(view.into());
        self
    }

    pub fn with_host_url(mut self, host_url: impl Into<String>) -> Self {
        self.host_url = host_url.into();
        self
    }

    pub fn root(&self) -> &ResourceRef {
        &self.root
    }

    pub fn context(&self) -> &ResourceRef {
        &self.context
    }

    /// Explicit request type, if any
    pub fn request_type(&self) -> Option<&TypeTag> {
        self.request_type.as_ref()
    }

    /// Request type used for lookups; [`TypeTag::REQUEST`] when none is set
    pub fn effective_request_type(&self) -> TypeTag {
        self.request_type.clone().unwrap_or(TypeTag::REQUEST)
    }

    pub fn set_request_type(&mut self, request_type: Option<TypeTag>) {
        self.request_type = request_type;
    }

    /// Active top-level view name
    pub fn view(&self) -> Option<&str> {
        self.view.as_deref()
    }

    /// Layout selected for this request by a [`crate::LayoutPredicate`]
    pub fn selected_layout(&self) -> Option<&str> {
        self.layout.as_deref()
    }

    pub fn select_layout(&mut self, layout: impl Into<String>) {
        self.layout = Some(layout.into());
    }

    pub fn layout_data(&self) -> &LayoutData {
        &self.layout_data
    }

    pub fn layout_data_mut(&mut self) -> &mut LayoutData {
        &mut self.layout_data
    }

    /// Merge values into the layout data bag
    pub fn set_layout_data<I, K, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.layout_data
            .extend(values.into_iter().map(|(k, v)| (k.into(), v.into())));
    }

    /// Absolute URL of `resource`
    pub fn resource_url(&self, resource: &ResourceRef) -> String {
        format!(
            "{}{}",
            self.host_url.trim_end_matches('/'),
            resource_path(resource)
        )
    }

    pub(crate) fn take_layout_data(&mut self) -> LayoutData {
        std::mem::take(&mut self.layout_data)
    }

    pub(crate) fn restore_layout_data(&mut self, data: LayoutData) {
        self.layout_data = data;
    }
}
