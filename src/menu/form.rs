use super::error::{MenuError, MenuResult};
use super::index::MenuIndex;
use super::state::MenuAction;
use crate::ids::{fresh_id, IdGenerator};
use crate::models::{ItemPatch, LinkTarget, MenuItem};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormMode {
    New { parent_path: Vec<usize> },
    Edit { path: Vec<usize> },
}

impl FormMode {
    pub fn heading(&self) -> &'static str {
        match self {
            FormMode::New { parent_path } if parent_path.is_empty() => "New menu item",
            FormMode::New { .. } => "New sub-item",
            FormMode::Edit { .. } => "Edit menu item",
        }
    }
}

/// Raw form fields, as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemDraft {
    pub title: String,
    pub url: String,
    pub target: LinkTarget,
    pub icon: String,
    pub description: String,
}

fn optional(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

impl ItemDraft {
    pub fn from_item(item: &MenuItem) -> Self {
        Self {
            title: item.title.clone(),
            url: item.url.clone(),
            target: item.target,
            icon: item.icon.clone().unwrap_or_default(),
            description: item.description.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> MenuResult<()> {
        if self.title.trim().is_empty() {
            return Err(MenuError::MissingField("Title"));
        }
        if self.url.trim().is_empty() {
            return Err(MenuError::MissingField("URL"));
        }
        Ok(())
    }

    fn to_patch(&self) -> ItemPatch {
        ItemPatch {
            title: Some(self.title.trim().to_string()),
            url: Some(self.url.trim().to_string()),
            target: Some(self.target),
            icon: Some(optional(&self.icon)),
            description: Some(optional(&self.description)),
        }
    }

    /// Validates the draft and turns it into the action the form submits.
    ///
    /// New items get an id from `ids` that is not already used in `index`.
    pub fn into_action(
        self,
        mode: &FormMode,
        ids: &dyn IdGenerator,
        index: &MenuIndex,
    ) -> MenuResult<MenuAction> {
        self.validate()?;

        match mode {
            FormMode::New { parent_path } => {
                let mut item = MenuItem::new(fresh_id(ids, index)?, "", "");
                self.to_patch().apply_to(&mut item);
                Ok(MenuAction::Add {
                    parent_path: parent_path.clone(),
                    item,
                })
            }
            FormMode::Edit { path } => Ok(MenuAction::Edit {
                path: path.clone(),
                patch: self.to_patch(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{is_temp_id, RandomIds};
    use rstest::rstest;

    fn draft(title: &str, url: &str) -> ItemDraft {
        ItemDraft {
            title: title.to_string(),
            url: url.to_string(),
            ..Default::default()
        }
    }

    #[rstest]
    #[case("", "/", "Title")]
    #[case("   ", "/", "Title")]
    #[case("Home", "", "URL")]
    #[case("Home", " \t", "URL")]
    fn test_required_fields(
        #[case] title: &str,
        #[case] url: &str,
        #[case] field: &'static str,
    ) {
        let err = draft(title, url).validate().unwrap_err();
        assert_eq!(err, MenuError::MissingField(field));
        assert_eq!(err.to_string(), format!("{field} is required"));
    }

    #[test]
    fn test_new_mode_builds_trimmed_leaf_with_temp_id() {
        let mut d = draft("  Home ", " / ");
        d.icon = "  ".to_string();
        d.description = " Landing page ".to_string();

        let action = d
            .into_action(
                &FormMode::New { parent_path: vec![] },
                &RandomIds,
                &MenuIndex::default(),
            )
            .unwrap();

        let MenuAction::Add { parent_path, item } = action else {
            panic!("expected an add action");
        };
        assert!(parent_path.is_empty());
        assert!(is_temp_id(&item.id));
        assert_eq!(item.title, "Home");
        assert_eq!(item.url, "/");
        assert_eq!(item.icon, None);
        assert_eq!(item.description.as_deref(), Some("Landing page"));
        assert!(item.children.is_empty());
    }

    #[test]
    fn test_edit_mode_builds_patch_that_can_clear_optionals() {
        let action = draft("About", "/about")
            .into_action(
                &FormMode::Edit { path: vec![0, 1] },
                &RandomIds,
                &MenuIndex::default(),
            )
            .unwrap();

        let MenuAction::Edit { path, patch } = action else {
            panic!("expected an edit action");
        };
        assert_eq!(path, vec![0, 1]);
        assert_eq!(patch.icon, Some(None));
        assert_eq!(patch.target, Some(LinkTarget::SelfFrame));
    }

    #[test]
    fn test_invalid_draft_produces_no_action() {
        let res = draft("", "/x").into_action(
            &FormMode::New { parent_path: vec![0] },
            &RandomIds,
            &MenuIndex::default(),
        );
        assert_eq!(res.unwrap_err(), MenuError::MissingField("Title"));
    }

    #[test]
    fn test_from_item_round_trips_fields() {
        let mut item = MenuItem::new("1", "Docs", "https://docs.rs");
        item.target = LinkTarget::Blank;
        item.icon = Some("book".to_string());

        let d = ItemDraft::from_item(&item);
        assert_eq!(d.target, LinkTarget::Blank);
        assert_eq!(d.icon, "book");
        assert_eq!(d.description, "");
    }

    #[test]
    fn test_heading_by_mode() {
        assert_eq!(FormMode::New { parent_path: vec![] }.heading(), "New menu item");
        assert_eq!(FormMode::New { parent_path: vec![2] }.heading(), "New sub-item");
        assert_eq!(FormMode::Edit { path: vec![0] }.heading(), "Edit menu item");
    }
}
