//! Cart lines, cart state and the reducer that mutates them.

use crate::model::{ItemId, MenuItem, Money};
use serde::Serialize;

/// Largest quantity a single line can hold; larger requests are clamped to it.
pub const MAX_LINE_QUANTITY: u32 = 999;

/// One catalog item plus the quantity a customer intends to purchase.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    #[serde(flatten)]
    pub item: MenuItem,
    /// Between 1 and [`MAX_LINE_QUANTITY`]; a line that would drop to 0 is removed instead.
    pub quantity: u32,
    #[serde(rename = "notes", skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl CartLine {
    fn new(item: MenuItem) -> Self {
        Self {
            item,
            quantity: 1,
            note: None,
        }
    }

    pub fn id(&self) -> &ItemId {
        &self.item.id
    }

    /// Unit price × quantity, unrounded.
    pub fn line_total(&self) -> Money {
        self.item.price * self.quantity
    }
}

/// A mutation of the cart.
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Append the item with quantity 1, or bump an existing line by 1.
    Add(MenuItem),
    /// Drop the line if present.
    Remove(ItemId),
    /// Set a line's quantity; zero or below removes the line.
    UpdateQuantity { id: ItemId, quantity: i64 },
    /// Attach or clear the free-text note on a line.
    SetNote { id: ItemId, note: Option<String> },
    /// Empty the cart.
    Clear,
}

/// Whether an action changed the line set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Changed,
    /// The action referred to a line that is not in the cart, or changed nothing.
    Unchanged,
}

/// Lines in insertion order plus totals derived from them.
///
/// `subtotal`, `tax` and `total` are recomputed from the full line set after every
/// action and are never adjusted incrementally.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CartState {
    lines: Vec<CartLine>,
    subtotal: Money,
    tax: Money,
    total: Money,
}

impl CartState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, id: &ItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id() == id)
    }

    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    pub fn tax(&self) -> Money {
        self.tax
    }

    pub fn total(&self) -> Money {
        self.total
    }

    /// Sum of quantities across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Applies one action and recomputes the totals with `tax_rate`.
    pub fn apply(&mut self, action: CartAction, tax_rate: f64) -> Applied {
        let applied = match action {
            CartAction::Add(item) => {
                match self.lines.iter_mut().find(|line| line.item.id == item.id) {
                    Some(line) if line.quantity >= MAX_LINE_QUANTITY => Applied::Unchanged,
                    Some(line) => {
                        line.quantity += 1;
                        Applied::Changed
                    }
                    None => {
                        self.lines.push(CartLine::new(item));
                        Applied::Changed
                    }
                }
            }
            CartAction::Remove(id) => self.remove(&id),
            CartAction::UpdateQuantity { id, quantity } if quantity <= 0 => self.remove(&id),
            CartAction::UpdateQuantity { id, quantity } => {
                let quantity = u32::try_from(quantity)
                    .unwrap_or(MAX_LINE_QUANTITY)
                    .min(MAX_LINE_QUANTITY);
                match self.lines.iter_mut().find(|line| line.item.id == id) {
                    Some(line) if line.quantity != quantity => {
                        line.quantity = quantity;
                        Applied::Changed
                    }
                    _ => Applied::Unchanged,
                }
            }
            CartAction::SetNote { id, note } => {
                let note = note.filter(|text| !text.trim().is_empty());
                match self.lines.iter_mut().find(|line| line.item.id == id) {
                    Some(line) if line.note != note => {
                        line.note = note;
                        Applied::Changed
                    }
                    _ => Applied::Unchanged,
                }
            }
            CartAction::Clear if self.lines.is_empty() => Applied::Unchanged,
            CartAction::Clear => {
                self.lines.clear();
                Applied::Changed
            }
        };
        self.recompute(tax_rate);
        applied
    }

    fn remove(&mut self, id: &ItemId) -> Applied {
        let before = self.lines.len();
        self.lines.retain(|line| &line.item.id != id);
        if self.lines.len() == before {
            Applied::Unchanged
        } else {
            Applied::Changed
        }
    }

    fn recompute(&mut self, tax_rate: f64) {
        self.subtotal = self.lines.iter().map(CartLine::line_total).sum();
        self.tax = self.subtotal * tax_rate;
        self.total = self.subtotal + self.tax;
    }
}
