//! Page adapters.
//!
//! A [`PageSurface`] takes the typed output of the controller and the action
//! handlers and applies it to some concrete UI. [`MemoryPage`] is the
//! in-memory tree used by the console front end and the tests.

use log::warn;

use crate::types::view::View;
use crate::ui::view_model::{ContentBlock, ItemControl, ItemId, ListItem, PagePatch, RenderedPage};

/// Applies rendered pages and patches to a UI tree.
pub trait PageSurface {
    /// Appends a full render to the results container.
    fn apply_render(&mut self, page: RenderedPage);
    /// Applies one incremental change. Returns `false` when the target is gone.
    fn apply_patch(&mut self, patch: PagePatch) -> bool;
    /// The active control registered for `item`, if it is still present and enabled.
    fn control(&self, item: ItemId) -> Option<ItemControl>;
}

/// In-memory page tree.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryPage {
    pub search_value: Option<String>,
    pub execution_stats: Option<String>,
    pub blocks: Vec<ContentBlock>,
    /// View option controls present on the page.
    pub options: Vec<String>,
    pub selected_option: Option<String>,
    pub alerts: Vec<String>,
    pub navigations: Vec<String>,
    pub opened_links: Vec<String>,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self {
            search_value: None,
            execution_stats: None,
            blocks: Vec::new(),
            options: View::ALL.iter().map(|v| v.option_id()).collect(),
            selected_option: None,
            alerts: Vec::new(),
            navigations: Vec::new(),
            opened_links: Vec::new(),
        }
    }
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// All list items currently on the page, in order.
    pub fn items(&self) -> Vec<&ListItem> {
        self.blocks
            .iter()
            .flat_map(|block| match block {
                ContentBlock::List(items) => items.iter().collect::<Vec<_>>(),
                _ => Vec::new(),
            })
            .collect()
    }

    pub fn item(&self, id: ItemId) -> Option<&ListItem> {
        self.items().into_iter().find(|item| item.id == id)
    }

    fn item_mut(&mut self, id: ItemId) -> Option<&mut ListItem> {
        self.blocks.iter_mut().find_map(|block| match block {
            ContentBlock::List(items) => items.iter_mut().find(|item| item.id == id),
            _ => None,
        })
    }
}

impl PageSurface for MemoryPage {
    fn apply_render(&mut self, page: RenderedPage) {
        if let Some(value) = page.search_value {
            self.search_value = Some(value);
        }
        if let Some(stats) = page.execution_stats {
            self.execution_stats = Some(stats);
        }
        self.blocks.extend(page.blocks);
        self.alerts.extend(page.alerts);

        // Best effort: an option that is not on the page is simply left alone.
        if let Some(name) = page.selected_option {
            let id = format!("{}-view", name);
            if self.options.contains(&id) {
                self.selected_option = Some(id);
            }
        }
    }

    fn apply_patch(&mut self, patch: PagePatch) -> bool {
        match patch {
            PagePatch::None => true,
            PagePatch::DisableFavorite(id) => match self.item_mut(id) {
                Some(ListItem {
                    control: ItemControl::Favorite { enabled, .. },
                    favorited,
                    ..
                }) => {
                    *enabled = false;
                    *favorited = true;
                    true
                }
                _ => {
                    warn!("no favorite toggle for {}", id);
                    false
                }
            },
            PagePatch::RemoveItem(id) => {
                for block in self.blocks.iter_mut() {
                    if let ContentBlock::List(items) = block {
                        if let Some(pos) = items.iter().position(|item| item.id == id) {
                            items.remove(pos);
                            return true;
                        }
                    }
                }
                false
            }
            PagePatch::Alert(message) => {
                self.alerts.push(message);
                true
            }
            PagePatch::Navigate(location) => {
                self.navigations.push(location);
                true
            }
            PagePatch::OpenLink(url) => {
                self.opened_links.push(url);
                true
            }
        }
    }

    fn control(&self, item: ItemId) -> Option<ItemControl> {
        self.item(item)
            .map(|item| item.control.clone())
            .filter(ItemControl::is_enabled)
    }
}
