//! Element options
//!
//! The declarative description of one element's role and behavior. Hosts
//! attach it as camel-case JSON in `data-state-options`; [`OptionsBuilder`]
//! produces that JSON.

use serde::{Deserialize, Deserializer, Serialize};

/// Role of a configured node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Root of a state group
    Group,
    /// Indicator or trigger inside a group
    #[default]
    Element,
}

impl Role {
    /// Attribute value for `data-state-role`
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Group => "group",
            Role::Element => "element",
        }
    }
}

/// HTML attribute applied in one state and removed in the other
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomAttribute {
    pub key: String,
    pub value: String,
}

impl DomAttribute {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> From<(K, V)> for DomAttribute {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

/// Options of one element, as found in `data-state-options`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementConfig {
    pub role: Role,
    /// Explicit group membership (or identity, for groups)
    #[serde(deserialize_with = "non_empty")]
    pub group_id: Option<String>,
    /// Explicit parent of an inheriting group
    #[serde(deserialize_with = "non_empty")]
    pub parent_group_id: Option<String>,
    pub inherit_group_state_from_parent: bool,
    pub busy_css_classes: Vec<String>,
    pub idle_css_classes: Vec<String>,
    pub busy_dom_attributes: Vec<DomAttribute>,
    pub idle_dom_attributes: Vec<DomAttribute>,
    /// DOM events that request the owning group go busy
    pub run_trigger_on_events: Vec<String>,
    /// When non-empty, only busy signals from these trigger ids apply
    pub exclusive_to_trigger_ids: Vec<String>,
    /// This element's own trigger id
    pub id: Option<String>,
}

/// An empty id counts as no id
fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|id| !id.is_empty()))
}

impl ElementConfig {
    /// Start building options
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::default()
    }

    /// Parse an options blob
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Serialize to the options blob
    pub fn to_json(&self) -> String {
        // Plain strings and lists cannot fail to serialize
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn is_group(&self) -> bool {
        self.role == Role::Group
    }

    /// Whether a busy signal from a trigger with `sender_id` applies.
    /// `None` means the signal has no sender at all.
    pub fn listens_to(&self, sender_id: Option<Option<&str>>) -> bool {
        if self.exclusive_to_trigger_ids.is_empty() {
            return true;
        }
        match sender_id {
            Some(Some(id)) => self.exclusive_to_trigger_ids.iter().any(|t| t == id),
            _ => false,
        }
    }

    /// Whether this element fires on `event`
    pub fn triggers_on(&self, event: &str) -> bool {
        self.run_trigger_on_events.iter().any(|e| e == event)
    }
}

/// Class hiding an element
pub const HIDDEN_CLASS: &str = "stateindicator-hidden";
/// Classes marking an element disabled
pub const DISABLED_CLASSES: &str = "stateindicator-disabled disabled";

/// Fluent builder for [`ElementConfig`]
#[derive(Debug, Clone, Default)]
pub struct OptionsBuilder {
    config: ElementConfig,
}

impl OptionsBuilder {
    /// Belong to (or, for groups, be) the group `id`. Without it, elements
    /// belong to the nearest group upwards in the DOM.
    pub fn use_group_id(mut self, id: impl Into<String>) -> Self {
        self.config.group_id = Some(id.into()).filter(|id: &String| !id.is_empty());
        self
    }

    /// Mark as the root of a state group
    pub fn is_group_root(mut self) -> Self {
        self.config.role = Role::Group;
        self
    }

    /// Let this group inherit its status from its parent group
    pub fn inherit_group_state(mut self) -> Self {
        self.config.inherit_group_state_from_parent = true;
        self
    }

    /// Name the parent group explicitly instead of the nearest DOM ancestor
    pub fn use_parent_group_id(mut self, parent_group_id: impl Into<String>) -> Self {
        self.config.parent_group_id =
            Some(parent_group_id.into()).filter(|id: &String| !id.is_empty());
        self
    }

    /// Act as a trigger for the owning group on the given DOM events
    pub fn trigger_on<I, S>(mut self, dom_events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config
            .run_trigger_on_events
            .extend(dom_events.into_iter().map(Into::into));
        self.config.role = Role::Element;
        self
    }

    /// Shorthand for `trigger_on(["click"])`
    pub fn trigger_on_click(self) -> Self {
        self.trigger_on(["click"])
    }

    /// Shorthand for `trigger_on(["change"])`
    pub fn trigger_on_change(self) -> Self {
        self.trigger_on(["change"])
    }

    /// Assign this element's trigger id
    pub fn use_id(mut self, id: impl ToString) -> Self {
        self.config.id = Some(id.to_string());
        self
    }

    /// Only react to busy signals from triggers with these ids
    pub fn listen_to_id<I, S>(mut self, trigger_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.config
            .exclusive_to_trigger_ids
            .extend(trigger_ids.into_iter().map(|s| s.to_string()));
        self
    }

    /// Attributes applied while busy
    pub fn use_when_busy_attributes<I, A>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<DomAttribute>,
    {
        self.config
            .busy_dom_attributes
            .extend(attributes.into_iter().map(Into::into));
        self
    }

    /// Attributes applied while idle
    pub fn use_when_not_busy_attributes<I, A>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<DomAttribute>,
    {
        self.config
            .idle_dom_attributes
            .extend(attributes.into_iter().map(Into::into));
        self
    }

    /// CSS classes applied while busy
    pub fn use_when_busy_css<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config
            .busy_css_classes
            .extend(classes.into_iter().map(Into::into));
        self
    }

    /// CSS classes applied while idle
    pub fn use_when_not_busy_css<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config
            .idle_css_classes
            .extend(classes.into_iter().map(Into::into));
        self
    }

    /// Hidden unless busy
    pub fn show_when_busy(self) -> Self {
        self.use_when_not_busy_css([HIDDEN_CLASS])
    }

    /// Hidden while busy
    pub fn show_when_not_busy(self) -> Self {
        self.use_when_busy_css([HIDDEN_CLASS])
    }

    /// Disabled while busy, optionally with the `disabled` attribute
    pub fn disable_when_busy(self, add_disabled_attribute: bool) -> Self {
        let builder = if add_disabled_attribute {
            self.use_when_busy_attributes([("disabled", "disabled")])
        } else {
            self
        };
        builder.use_when_busy_css([DISABLED_CLASSES])
    }

    /// Disabled while idle, optionally with the `disabled` attribute
    pub fn disable_when_idle(self, add_disabled_attribute: bool) -> Self {
        let builder = if add_disabled_attribute {
            self.use_when_not_busy_attributes([("disabled", "disabled")])
        } else {
            self
        };
        builder.use_when_not_busy_css([DISABLED_CLASSES])
    }

    /// Finish building
    pub fn build(self) -> ElementConfig {
        self.config
    }

    /// Serialized options blob for `data-state-options`
    pub fn compile(self) -> String {
        self.config.to_json()
    }
}
