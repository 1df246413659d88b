//! Plain-text layouts shared by the subcommands.

use std::fmt::Write as _;

use bookverse_core::{Book, CartView, Notification, NotificationKind};

/// One line per book: id, emoji, title, author, genre and price.
#[must_use]
pub fn book_line(book: &Book) -> String {
    format!(
        "{:>3}  {} {} by {} [{}] {}",
        book.id.as_i32(),
        book.emoji,
        book.title,
        book.author,
        book.genre,
        book.price
    )
}

/// The full card for a single book.
#[must_use]
pub fn book_card(book: &Book) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", book.emoji, book.title);
    let _ = writeln!(out, "by {}", book.author);
    let _ = writeln!(out, "{}", book.genre);
    if !book.description.is_empty() {
        let _ = writeln!(out, "{}", book.description);
    }
    let _ = write!(out, "{}", book.price);
    out
}

/// Cart contents numbered from 1, followed by the subtotal.
#[must_use]
pub fn cart(view: &CartView) -> String {
    if view.is_empty() {
        return "Your cart is empty.".to_string();
    }
    let mut out = String::new();
    for item in &view.items {
        let _ = writeln!(out, "{:>3}. {} {}", item.index + 1, item.title, item.price);
    }
    let _ = write!(out, "Subtotal: {} ({} items)", view.subtotal, view.item_count);
    out
}

/// A notification with a marker for its kind.
#[must_use]
pub fn notification(note: &Notification) -> String {
    match note.kind {
        NotificationKind::Success => format!("✔ {note}"),
        NotificationKind::Warning => format!("⚠ {note}"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bookverse_core::{BookId, Cart, Catalog};

    use super::*;

    #[test]
    fn test_book_line() {
        let catalog = Catalog::seeded();
        let dune = catalog.get_book(BookId::new(3)).unwrap();
        let line = book_line(dune);
        assert!(line.contains("Dune by Frank Herbert"));
        assert!(line.contains("[Science Fiction]"));
        assert!(line.ends_with("$18.99"));
    }

    #[test]
    fn test_cart_numbers_from_one() {
        let catalog = Catalog::seeded();
        let mut cart = Cart::new();
        cart.add(catalog.get_book(BookId::new(5)).unwrap().clone());
        cart.add(catalog.get_book(BookId::new(4)).unwrap().clone());

        let text = cart_text(&cart);
        assert!(text.starts_with("  1. The Hound of the Baskervilles $9.99"));
        assert!(text.contains("  2. The Hobbit $14.99"));
        assert!(text.ends_with("Subtotal: $24.98 (2 items)"));
    }

    fn cart_text(cart: &Cart) -> String {
        super::cart(&cart.render())
    }

    #[test]
    fn test_empty_cart() {
        assert_eq!(cart(&CartView::empty()), "Your cart is empty.");
    }

    #[test]
    fn test_notification_marker() {
        assert_eq!(
            notification(&Notification::warning("Your cart is empty!")),
            "⚠ Your cart is empty!"
        );
    }
}
