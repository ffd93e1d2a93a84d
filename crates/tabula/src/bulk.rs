//! Bulk actions over the current selection.
//!
//! The bar shows only while something is selected. Each action may carry a
//! visibility predicate evaluated against a caller-supplied context (the
//! active status tab, for instance) every time the bar is rendered.

use std::fmt;

use serde::Serialize;

use crate::row::RowId;

/// Presentation style tag of an action button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStyle {
    #[default]
    Default,
    Primary,
    Danger,
    DangerSolid,
    Success,
    Warning,
}

/// What the table does with the selection after an action ran.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AfterAction {
    #[default]
    Keep,
    ClearSelection,
}

type Effect = Box<dyn FnMut(&[RowId]) -> AfterAction>;
type Predicate<C> = Box<dyn Fn(&C) -> bool>;

/// A bulk action descriptor.
///
/// # Example
///
/// ```
/// use tabula::{ActionStyle, AfterAction, BulkAction};
///
/// #[derive(PartialEq)]
/// enum Tab { Active, Trash }
///
/// let restore = BulkAction::new("Restore", |ids| {
///     println!("restoring {} rows", ids.len());
///     AfterAction::ClearSelection
/// })
/// .style(ActionStyle::Success)
/// .visible_when(|tab: &Tab| *tab == Tab::Trash);
///
/// assert!(!restore.is_visible(&Tab::Active));
/// assert!(restore.is_visible(&Tab::Trash));
/// ```
pub struct BulkAction<C> {
    label: String,
    style: ActionStyle,
    visible: Option<Predicate<C>>,
    effect: Effect,
}

impl<C> BulkAction<C> {
    pub fn new(
        label: impl Into<String>,
        effect: impl FnMut(&[RowId]) -> AfterAction + 'static,
    ) -> Self {
        BulkAction {
            label: label.into(),
            style: ActionStyle::Default,
            visible: None,
            effect: Box::new(effect),
        }
    }

    pub fn style(mut self, style: ActionStyle) -> Self {
        self.style = style;
        self
    }

    /// Shows the action only when `predicate` holds for the current context.
    pub fn visible_when(mut self, predicate: impl Fn(&C) -> bool + 'static) -> Self {
        self.visible = Some(Box::new(predicate));
        self
    }

    /// Shows or hides the action unconditionally.
    pub fn shown(mut self, shown: bool) -> Self {
        self.visible = Some(Box::new(move |_: &C| shown));
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_visible(&self, ctx: &C) -> bool {
        self.visible.as_ref().is_none_or(|predicate| predicate(ctx))
    }

    /// Runs the effect against the selected ids.
    pub fn run(&mut self, ids: &[RowId]) -> AfterAction {
        (self.effect)(ids)
    }
}

impl<C> fmt::Debug for BulkAction<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BulkAction")
            .field("label", &self.label)
            .field("style", &self.style)
            .field("conditional", &self.visible.is_some())
            .finish()
    }
}

/// One rendered button of the bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionButton {
    /// Index into the bar's action list, used to invoke the action.
    pub index: usize,
    pub label: String,
    pub style: ActionStyle,
}

/// The rendered bar: count label, visible buttons, and the clear control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkBarView {
    pub selected_count: usize,
    pub actions: Vec<ActionButton>,
    /// The "clear selection" control, offered regardless of the actions.
    pub can_clear: bool,
}

/// Ordered list of bulk actions.
pub struct BulkActionBar<C> {
    actions: Vec<BulkAction<C>>,
}

impl<C> Default for BulkActionBar<C> {
    fn default() -> Self {
        BulkActionBar {
            actions: Vec::new(),
        }
    }
}

impl<C> BulkActionBar<C> {
    pub fn new(actions: Vec<BulkAction<C>>) -> Self {
        BulkActionBar { actions }
    }

    pub fn push(&mut self, action: BulkAction<C>) {
        self.actions.push(action);
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Renders the bar, or `None` when nothing is selected.
    pub fn render(&self, selected_count: usize, ctx: &C) -> Option<BulkBarView> {
        if selected_count == 0 {
            return None;
        }
        let actions = self
            .actions
            .iter()
            .enumerate()
            .filter(|(_, action)| action.is_visible(ctx))
            .map(|(index, action)| ActionButton {
                index,
                label: action.label.clone(),
                style: action.style,
            })
            .collect();
        Some(BulkBarView {
            selected_count,
            actions,
            can_clear: true,
        })
    }

    /// Runs the action at `index` if it is currently visible and something is
    /// selected. Returns `None` when nothing ran.
    pub fn invoke(&mut self, index: usize, ctx: &C, ids: &[RowId]) -> Option<AfterAction> {
        if ids.is_empty() {
            return None;
        }
        let action = self.actions.get_mut(index)?;
        if !action.is_visible(ctx) {
            tracing::debug!(index, label = %action.label, "bulk action hidden, not running");
            return None;
        }
        tracing::debug!(index, label = %action.label, selected = ids.len(), "running bulk action");
        Some(action.run(ids))
    }
}

impl<C> fmt::Debug for BulkActionBar<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.actions).finish()
    }
}
