//! Property-based tests for the cart reducer.
//!
//! These tests use proptest to check the cart invariants across many
//! randomly generated command sequences.

use std::collections::HashSet;

use proptest::prelude::*;
use rust_decimal::Decimal;
use storefront_cart::{CartCommand, CartState, Product, ProductId};

fn product(id: u64) -> Product {
    // Price depends only on the id so repeated adds carry the same snapshot.
    Product::new(id, format!("Product {}", id), Decimal::new(i64::try_from(id).unwrap_or(0) * 137 + 99, 2))
}

prop_compose! {
    fn arbitrary_id()(id in 0..6u64) -> u64 {
        id
    }
}

fn arbitrary_command() -> impl Strategy<Value = CartCommand> {
    prop_oneof![
        4 => arbitrary_id().prop_map(|id| CartCommand::AddToCart(product(id))),
        2 => arbitrary_id().prop_map(|id| CartCommand::RemoveFromCart(ProductId(id))),
        2 => (arbitrary_id(), -5..20i64).prop_map(|(id, qty)| CartCommand::UpdateQuantity(ProductId(id), qty)),
        1 => Just(CartCommand::ClearCart),
        2 => arbitrary_id().prop_map(|id| CartCommand::AddToFavourites(product(id))),
        2 => arbitrary_id().prop_map(|id| CartCommand::RemoveFromFavourites(ProductId(id))),
    ]
}

fn run(commands: Vec<CartCommand>) -> CartState {
    commands.into_iter().fold(CartState::new(), CartState::apply)
}

proptest! {
    #[test]
    fn lines_and_favourites_stay_unique(commands in prop::collection::vec(arbitrary_command(), 0..60)) {
        let state = run(commands);

        let line_ids: HashSet<ProductId> = state.lines().iter().map(|l| l.id()).collect();
        prop_assert_eq!(line_ids.len(), state.lines().len());

        let favourite_ids: HashSet<ProductId> = state.favourites().iter().map(|p| p.id).collect();
        prop_assert_eq!(favourite_ids.len(), state.favourites().len());
    }

    #[test]
    fn quantities_never_drop_below_one(commands in prop::collection::vec(arbitrary_command(), 0..60)) {
        let state = run(commands);
        prop_assert!(state.lines().iter().all(|l| l.quantity >= 1));
    }

    #[test]
    fn repeated_adds_count_units(id in arbitrary_id(), times in 1..25u32) {
        let state = run((0..times).map(|_| CartCommand::AddToCart(product(id))).collect());

        prop_assert_eq!(state.cart_item_count(), 1);
        prop_assert_eq!(state.line(ProductId(id)).map(|l| l.quantity), Some(times));
    }

    #[test]
    fn non_positive_quantity_clamps_to_one(id in arbitrary_id(), qty in i64::MIN..=0) {
        let state = run(vec![
            CartCommand::AddToCart(product(id)),
            CartCommand::AddToCart(product(id)),
            CartCommand::UpdateQuantity(ProductId(id), qty),
        ]);
        prop_assert_eq!(state.line(ProductId(id)).map(|l| l.quantity), Some(1));
    }

    #[test]
    fn remove_is_idempotent(commands in prop::collection::vec(arbitrary_command(), 0..40), id in arbitrary_id()) {
        let once = run(commands).apply(CartCommand::RemoveFromCart(ProductId(id)));
        let twice = once.clone().apply(CartCommand::RemoveFromCart(ProductId(id)));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn add_to_favourites_is_idempotent(commands in prop::collection::vec(arbitrary_command(), 0..40), id in arbitrary_id()) {
        let once = run(commands).apply(CartCommand::AddToFavourites(product(id)));
        let twice = once.clone().apply(CartCommand::AddToFavourites(product(id)));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn clear_resets_everything(commands in prop::collection::vec(arbitrary_command(), 0..60)) {
        let state = run(commands).apply(CartCommand::ClearCart);
        prop_assert!(state.lines().is_empty());
        prop_assert!(state.favourites().is_empty());
    }

    #[test]
    fn total_matches_line_subtotals(commands in prop::collection::vec(arbitrary_command(), 0..60)) {
        let state = run(commands);
        let expected: Decimal = state
            .lines()
            .iter()
            .map(|l| l.product.price * Decimal::from(l.quantity))
            .sum();
        prop_assert_eq!(state.cart_total(), expected);
        prop_assert!(state.cart_total() >= Decimal::ZERO);
    }
}

#[test]
fn checkout_scenario_total_and_badge() {
    let first = Product::new(1u64, "Backpack", Decimal::new(999, 2));
    let second = Product::new(2u64, "T-Shirt", Decimal::new(500, 2));
    let state = run(vec![
        CartCommand::AddToCart(first.clone()),
        CartCommand::AddToCart(second),
        CartCommand::AddToCart(first),
    ]);

    assert_eq!(state.cart_total(), Decimal::new(2498, 2));
    assert_eq!(state.cart_item_count(), 2);
    assert_eq!(state.unit_count(), 3);
}

#[test]
fn cart_state_round_trips_through_json() {
    let state = run(vec![
        CartCommand::AddToCart(product(1)),
        CartCommand::AddToCart(product(1)),
        CartCommand::AddToFavourites(product(2)),
    ]);

    let json = serde_json::to_string(&state).unwrap();
    let restored: CartState = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, state);
}
