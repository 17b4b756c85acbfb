use crate::domain::{CartLine, CartState};
use super::commands::CartCommand;

impl CartState {
    /// Applies one command and returns the next state.
    ///
    /// # Commands
    /// - `AddToCart`: bumps an existing line by one or appends a new line
    /// - `RemoveFromCart`: drops the line, no-op when absent
    /// - `UpdateQuantity`: sets `max(qty, 1)` on an existing line
    /// - `ClearCart`: back to the empty state, favourites included
    /// - `AddToFavourites`: appends unless already favourited
    /// - `RemoveFromFavourites`: drops the favourite, no-op when absent
    pub fn apply(mut self, command: CartCommand) -> CartState {
        match command {
            CartCommand::AddToCart(product) => {
                match self.lines.iter_mut().find(|line| line.id() == product.id) {
                    Some(line) => line.quantity = line.quantity.saturating_add(1),
                    None => self.lines.push(CartLine::new(product)),
                }
                self
            }
            CartCommand::RemoveFromCart(id) => {
                self.lines.retain(|line| line.id() != id);
                self
            }
            CartCommand::UpdateQuantity(id, quantity) => {
                if let Some(line) = self.lines.iter_mut().find(|line| line.id() == id) {
                    line.quantity = u32::try_from(quantity.max(1)).unwrap_or(u32::MAX);
                }
                self
            }
            CartCommand::ClearCart => CartState::default(),
            CartCommand::AddToFavourites(product) => {
                if !self.is_favourite(product.id) {
                    self.favourites.push(product);
                }
                self
            }
            CartCommand::RemoveFromFavourites(id) => {
                self.favourites.retain(|product| product.id != id);
                self
            }
        }
    }
}
