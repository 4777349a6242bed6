use super::*;
use shared::domain::Quantity;

fn lamp() -> Product {
    Product::new(Quantity::Available(2))
        .with_id("lamp")
        .with_field("name", "Lamp")
}

#[test]
fn toggle_without_selection_alternates_listing_and_creating() {
    let mut state = ViewState::default();
    for step in 0..6 {
        let expected = if step % 2 == 0 {
            ViewState::Listing
        } else {
            ViewState::Creating
        };
        assert_eq!(state, expected, "step {step}");
        state.toggle();
    }
}

#[test]
fn toggle_from_editing_returns_to_detail_not_list() {
    let mut state = ViewState::Editing(lamp());
    state.toggle();
    assert_eq!(state, ViewState::Viewing(lamp()));
    state.toggle();
    assert_eq!(state, ViewState::Listing);
}

#[test]
fn button_label_follows_current_view() {
    assert_eq!(ViewState::Listing.button().label, "Add a product");
    assert_eq!(ViewState::Creating.button().label, "Back to product list");
    assert_eq!(ViewState::Viewing(lamp()).button().label, "Back to product list");
    assert_eq!(
        ViewState::Editing(lamp()).button().label,
        "Back to Product Detail"
    );
    assert_eq!(ViewState::Editing(lamp()).button().intent(), Intent::Toggle);
}

#[test]
fn request_edit_only_from_detail() {
    let mut state = ViewState::Viewing(lamp());
    state.request_edit().expect("edit from detail");
    assert_eq!(state, ViewState::Editing(lamp()));

    let mut listing = ViewState::Listing;
    let err = listing.request_edit().expect_err("must fail");
    assert_eq!(
        err,
        CatalogError::InvalidTransition {
            intent: "request edit",
            state: "listing",
        }
    );
    assert_eq!(listing, ViewState::Listing);
}

#[test]
fn select_is_rejected_while_editing() {
    let mut state = ViewState::Editing(lamp());
    let other = Product::new(Quantity::Available(1)).with_id("chair");
    assert!(matches!(
        state.select(other),
        Err(CatalogError::InvalidTransition { .. })
    ));
    assert_eq!(state.selected(), Some(&lamp()));
}

#[test]
fn submit_new_requires_create_form() {
    let mut state = ViewState::Creating;
    state.submit_new().expect("submit");
    assert_eq!(state, ViewState::Listing);

    assert!(state.submit_new().is_err());
    assert_eq!(state, ViewState::Listing);
}

#[test]
fn submit_edit_returns_edited_id_and_goes_to_list() {
    let mut state = ViewState::Editing(lamp());
    let id = state.submit_edit().expect("submit");
    assert_eq!(id, ProductId::from("lamp"));
    assert_eq!(state, ViewState::Listing);
}

#[test]
fn submit_edit_without_id_keeps_form_open() {
    let unsaved = Product::new(Quantity::Available(1));
    let mut state = ViewState::Editing(unsaved.clone());
    assert_eq!(state.submit_edit(), Err(CatalogError::MissingId));
    assert_eq!(state, ViewState::Editing(unsaved));
}

#[test]
fn show_updated_keeps_edit_form_open() {
    let mut sold = lamp();
    sold.quantity = Quantity::Available(1);

    let mut editing = ViewState::Editing(lamp());
    editing.show_updated(sold.clone());
    assert_eq!(editing, ViewState::Editing(sold.clone()));

    let mut listing = ViewState::Listing;
    listing.show_updated(sold.clone());
    assert_eq!(listing, ViewState::Viewing(sold));
}

#[test]
fn delete_leaves_detail_but_not_open_forms() {
    let mut viewing = ViewState::Viewing(lamp());
    viewing.finish_delete().expect("delete from detail");
    assert_eq!(viewing, ViewState::Listing);

    let mut editing = ViewState::Editing(lamp());
    assert_eq!(
        editing.finish_delete(),
        Err(CatalogError::InvalidTransition {
            intent: "delete",
            state: "editing",
        })
    );
    assert_eq!(editing, ViewState::Editing(lamp()));
    assert!(ViewState::Creating.finish_delete().is_err());
}
