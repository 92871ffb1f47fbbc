use serde::{Deserialize, Serialize};

/// Where a menu link opens.
#[derive(
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    strum::Display,
    strum::AsRefStr,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum LinkTarget {
    #[default]
    #[serde(rename = "_self")]
    #[strum(serialize = "_self")]
    SelfFrame,

    #[serde(rename = "_blank")]
    #[strum(serialize = "_blank")]
    Blank,
}

impl LinkTarget {
    pub fn label(self) -> &'static str {
        match self {
            LinkTarget::SelfFrame => "Same window",
            LinkTarget::Blank => "New window",
        }
    }
}

/// One node of the menu tree.
///
/// A missing `children` field and `children: []` are the same thing; the field
/// is always written back as an array.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MenuItem {
    pub id: String,
    pub title: String,
    pub url: String,

    #[serde(default)]
    pub target: LinkTarget,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub children: Vec<MenuItem>,
}

impl MenuItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: url.into(),
            target: LinkTarget::default(),
            icon: None,
            description: None,
            children: vec![],
        }
    }

    pub fn with_children(mut self, children: Vec<MenuItem>) -> Self {
        self.children = children;
        self
    }
}

/// Field-level update for an existing node. `None` leaves the field alone.
///
/// `icon`/`description` use a nested option so a patch can clear them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub target: Option<LinkTarget>,
    pub icon: Option<Option<String>>,
    pub description: Option<Option<String>>,
}

impl ItemPatch {
    pub(crate) fn apply_to(&self, item: &mut MenuItem) {
        if let Some(title) = &self.title {
            item.title = title.clone();
        }
        if let Some(url) = &self.url {
            item.url = url.clone();
        }
        if let Some(target) = self.target {
            item.target = target;
        }
        if let Some(icon) = &self.icon {
            item.icon = icon.clone();
        }
        if let Some(description) = &self.description {
            item.description = description.clone();
        }
    }
}

/// Wire shape of the menu endpoints.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub(crate) struct MenuDocument {
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_children_and_target_use_defaults() {
        let json = r#"{"id": "1", "title": "Home", "url": "/"}"#;
        let item: MenuItem = serde_json::from_str(json).expect("item should parse");
        assert_eq!(item.target, LinkTarget::SelfFrame);
        assert!(item.children.is_empty());
        assert!(item.icon.is_none());
    }

    #[test]
    fn test_empty_children_equals_absent_children() {
        let a: MenuItem =
            serde_json::from_str(r#"{"id": "1", "title": "A", "url": "/a"}"#).unwrap();
        let b: MenuItem =
            serde_json::from_str(r#"{"id": "1", "title": "A", "url": "/a", "children": []}"#)
                .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_serialize_writes_children_and_skips_absent_optionals() {
        let item = MenuItem::new("temp-1", "Home", "/");
        let v = serde_json::to_value(&item).expect("should serialize");
        assert_eq!(v["target"], "_self");
        assert_eq!(v["children"], serde_json::json!([]));
        assert!(v.get("icon").is_none());
        assert!(v.get("description").is_none());
    }

    #[test]
    fn test_blank_target_round_trips_through_strum_and_serde() {
        assert_eq!(LinkTarget::Blank.as_ref(), "_blank");
        assert_eq!("_blank".parse::<LinkTarget>().ok(), Some(LinkTarget::Blank));

        let item: MenuItem = serde_json::from_str(
            r#"{"id": "x", "title": "Docs", "url": "https://docs.rs", "target": "_blank"}"#,
        )
        .unwrap();
        assert_eq!(item.target, LinkTarget::Blank);
    }

    #[test]
    fn test_patch_only_touches_given_fields() {
        let mut item = MenuItem::new("1", "Home", "/");
        item.icon = Some("fa-home".to_string());

        let patch = ItemPatch {
            title: Some("Start".to_string()),
            icon: Some(None),
            ..Default::default()
        };
        patch.apply_to(&mut item);

        assert_eq!(item.title, "Start");
        assert_eq!(item.url, "/");
        assert!(item.icon.is_none());
    }
}
