//! Interactive shopping session.
//!
//! Reads one command per line from stdin. The deployment banner is printed
//! at start and again whenever the live slot or version changes.
//!
//! ```text
//! bookverse> list
//! bookverse> search tolkien
//! bookverse> add 4
//! bookverse> cart
//! bookverse> remove 1
//! bookverse> checkout
//! ```

use std::io::Write as _;
use std::str::FromStr;
use std::sync::Arc;

use bookverse_core::{BookFilter, BookId, CartError, VersionInfo};
use bookverse_shop::{
    CartController, CatalogSource, CatalogView, ClientError, DeploymentMonitor,
    HttpCatalogClient, LOAD_ERROR_MESSAGE, ShopConfig,
};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::render;

const PROMPT: &str = "bookverse> ";

const HELP: &str = "\
Commands:
  list               Show every book
  search <text>      Show books whose card contains <text>
  genre <name|all>   Show books of one genre
  add <id>           Put a book in the cart
  remove <n>         Take item <n> out of the cart
  cart               Show the cart
  checkout           Place the order
  banner             Show deployment and health
  help               Show this help
  quit               Leave";

/// Errors that end the session.
#[derive(Debug, Error)]
pub enum ShopError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// A line the user can type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShopCommand {
    List,
    Search(String),
    Genre(String),
    Add(BookId),
    /// Zero-based cart position.
    Remove(usize),
    Cart,
    Checkout,
    Banner,
    Help,
    Quit,
}

/// Why a line could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCommandError {
    #[error("Unknown command: {0} (type `help`)")]
    Unknown(String),

    #[error("Usage: {0}")]
    MissingArgument(&'static str),

    #[error("Not a valid number: {0}")]
    InvalidNumber(String),

    #[error("Item numbers start at 1")]
    ZeroItem,
}

impl FromStr for ShopCommand {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(w, r)| (w, r.trim()));

        match word.to_lowercase().as_str() {
            "list" | "ls" => Ok(Self::List),
            "search" => Ok(Self::Search(rest.to_string())),
            "genre" => {
                if rest.is_empty() {
                    return Err(ParseCommandError::MissingArgument("genre <name|all>"));
                }
                Ok(Self::Genre(rest.to_string()))
            }
            "add" => {
                if rest.is_empty() {
                    return Err(ParseCommandError::MissingArgument("add <id>"));
                }
                rest.parse::<BookId>()
                    .map(Self::Add)
                    .map_err(|_| ParseCommandError::InvalidNumber(rest.to_string()))
            }
            "remove" | "rm" => {
                if rest.is_empty() {
                    return Err(ParseCommandError::MissingArgument("remove <n>"));
                }
                let position = rest
                    .parse::<usize>()
                    .map_err(|_| ParseCommandError::InvalidNumber(rest.to_string()))?;
                position
                    .checked_sub(1)
                    .map(Self::Remove)
                    .ok_or(ParseCommandError::ZeroItem)
            }
            "cart" => Ok(Self::Cart),
            "checkout" => Ok(Self::Checkout),
            "banner" | "status" => Ok(Self::Banner),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(ParseCommandError::Unknown(other.to_string())),
        }
    }
}

/// What to do after a command ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print this.
    Text(String),
    /// Nothing to print.
    Silent,
    /// Show the deployment banner.
    Banner,
    /// End the session.
    Quit,
}

/// One user's shopping session.
pub struct ShopSession<S> {
    controller: CartController<S>,
}

impl<S: CatalogSource> ShopSession<S> {
    pub const fn new(controller: CartController<S>) -> Self {
        Self { controller }
    }

    /// Run one command against the cart or the catalog.
    pub async fn execute(&mut self, command: ShopCommand) -> Reply {
        match command {
            ShopCommand::List => self.browse(&BookFilter::All).await,
            ShopCommand::Search(term) => self.browse(&BookFilter::search(&term)).await,
            ShopCommand::Genre(label) => match BookFilter::genre(&label) {
                Ok(filter) => self.browse(&filter).await,
                Err(e) => Reply::Text(e.to_string()),
            },
            ShopCommand::Add(id) => match self.controller.add_to_cart(id).await {
                Ok(note) => Reply::Text(format!(
                    "{}\nCart: {}",
                    render::notification(&note),
                    self.controller.cart_count()
                )),
                Err(e) if e.is_silent() => Reply::Silent,
                Err(e) => Reply::Text(e.to_string()),
            },
            ShopCommand::Remove(index) => match self.controller.remove_from_cart(index) {
                Ok(_) => Reply::Text(render::cart(&self.controller.render_cart())),
                Err(CartError::IndexOutOfRange { index, len }) => {
                    Reply::Text(format!("No item {} in the cart ({len} items)", index + 1))
                }
                Err(e) => Reply::Text(e.to_string()),
            },
            ShopCommand::Cart => Reply::Text(render::cart(&self.controller.render_cart())),
            ShopCommand::Checkout => {
                let outcome = self.controller.checkout();
                Reply::Text(render::notification(&outcome.notification()))
            }
            ShopCommand::Banner => Reply::Banner,
            ShopCommand::Help => Reply::Text(HELP.to_string()),
            ShopCommand::Quit => Reply::Quit,
        }
    }

    async fn browse(&self, filter: &BookFilter) -> Reply {
        match self.controller.browse(filter).await {
            CatalogView::Unavailable => Reply::Text(LOAD_ERROR_MESSAGE.to_string()),
            CatalogView::Loaded(books) if books.is_empty() => {
                Reply::Text("No books match.".to_string())
            }
            CatalogView::Loaded(books) => Reply::Text(
                books
                    .iter()
                    .map(render::book_line)
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
        }
    }
}

/// Run the interactive session until `quit` or end of input.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or stdin fails.
#[allow(clippy::print_stdout)]
pub async fn run(config: &ShopConfig) -> Result<(), ShopError> {
    let client = HttpCatalogClient::new(config)?;
    let monitor = DeploymentMonitor::from_config(Arc::new(client.clone()), config);
    let mut deployment = monitor.subscribe_deployment();
    let mut session = ShopSession::new(CartController::new(client));

    println!("Welcome to BookVerse. Type `help` for commands.");
    if let Reply::Text(listing) = session.execute(ShopCommand::List).await {
        println!("{listing}");
    }

    let mut shown: Option<(String, String)> = None;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        prompt()?;

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                let reply = match line.parse::<ShopCommand>() {
                    Ok(command) => session.execute(command).await,
                    Err(e) => Reply::Text(e.to_string()),
                };
                match reply {
                    Reply::Text(text) => println!("{text}"),
                    Reply::Silent => {}
                    Reply::Banner => {
                        println!(
                            "{}",
                            monitor
                                .banner()
                                .unwrap_or_else(|| "🚀 Deployment: checking...".to_string())
                        );
                        println!("{}", monitor.health());
                    }
                    Reply::Quit => break,
                }
            }
            Ok(()) = deployment.changed() => {
                let latest = deployment.borrow_and_update().clone();
                if let Some(info) = latest {
                    if announce(&mut shown, &info) {
                        println!("\n{}", info.banner());
                    }
                }
            }
        }
    }

    monitor.shutdown().await;
    Ok(())
}

/// Record `info` as shown; true when the slot or version differs from the
/// last banner printed.
fn announce(shown: &mut Option<(String, String)>, info: &VersionInfo) -> bool {
    let key = (info.color.clone(), info.version.clone());
    if shown.as_ref() == Some(&key) {
        return false;
    }
    *shown = Some(key);
    true
}

#[allow(clippy::print_stdout)]
fn prompt() -> std::io::Result<()> {
    print!("{PROMPT}");
    std::io::stdout().flush()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bookverse_core::{Book, Catalog, CatalogError};

    use super::*;

    struct SeededCatalog(Catalog);

    impl CatalogSource for SeededCatalog {
        async fn list_books(&self) -> Result<Vec<Book>, ClientError> {
            Ok(self.0.list_books().to_vec())
        }

        async fn get_book(&self, id: BookId) -> Result<Book, ClientError> {
            self.0.get_book(id).cloned().map_err(|e| match e {
                CatalogError::NotFound(id) => ClientError::NotFound(id),
                other => panic!("unexpected catalog error: {other}"),
            })
        }
    }

    fn session() -> ShopSession<SeededCatalog> {
        ShopSession::new(CartController::new(SeededCatalog(Catalog::seeded())))
    }

    fn text(reply: Reply) -> String {
        match reply {
            Reply::Text(text) => text,
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("list".parse::<ShopCommand>().unwrap(), ShopCommand::List);
        assert_eq!(
            "  ADD 3 ".parse::<ShopCommand>().unwrap(),
            ShopCommand::Add(BookId::new(3))
        );
        assert_eq!(
            "remove 2".parse::<ShopCommand>().unwrap(),
            ShopCommand::Remove(1)
        );
        assert_eq!(
            "search the hobbit".parse::<ShopCommand>().unwrap(),
            ShopCommand::Search("the hobbit".to_string())
        );
        assert_eq!(
            "genre science fiction".parse::<ShopCommand>().unwrap(),
            ShopCommand::Genre("science fiction".to_string())
        );
        assert_eq!("exit".parse::<ShopCommand>().unwrap(), ShopCommand::Quit);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "remove 0".parse::<ShopCommand>().unwrap_err(),
            ParseCommandError::ZeroItem
        );
        assert_eq!(
            "add abc".parse::<ShopCommand>().unwrap_err(),
            ParseCommandError::InvalidNumber("abc".to_string())
        );
        assert_eq!(
            "add".parse::<ShopCommand>().unwrap_err(),
            ParseCommandError::MissingArgument("add <id>")
        );
        assert!(matches!(
            "dance".parse::<ShopCommand>().unwrap_err(),
            ParseCommandError::Unknown(_)
        ));
    }

    #[tokio::test]
    async fn test_add_then_checkout() {
        let mut session = session();

        let added = text(session.execute(ShopCommand::Add(BookId::new(4))).await);
        assert_eq!(added, "✔ \"The Hobbit\" added to cart!\nCart: 1");

        let placed = text(session.execute(ShopCommand::Checkout).await);
        assert_eq!(
            placed,
            "✔ Order placed! Total: $14.99. Thank you for shopping with BookVerse! 🎉"
        );

        let empty = text(session.execute(ShopCommand::Checkout).await);
        assert_eq!(empty, "⚠ Your cart is empty!");
    }

    #[tokio::test]
    async fn test_unknown_book_prints_nothing() {
        let mut session = session();
        assert_eq!(
            session.execute(ShopCommand::Add(BookId::new(42))).await,
            Reply::Silent
        );
        assert_eq!(
            text(session.execute(ShopCommand::Cart).await),
            "Your cart is empty."
        );
    }

    #[tokio::test]
    async fn test_remove_out_of_range_reports() {
        let mut session = session();
        session.execute(ShopCommand::Add(BookId::new(1))).await;

        let reply = text(session.execute(ShopCommand::Remove(3)).await);
        assert_eq!(reply, "No item 4 in the cart (1 items)");
        assert!(text(session.execute(ShopCommand::Cart).await).contains("(1 items)"));
    }

    #[tokio::test]
    async fn test_genre_listing() {
        let mut session = session();
        let listing = text(
            session
                .execute(ShopCommand::Genre("science fiction".to_string()))
                .await,
        );
        assert_eq!(listing.lines().count(), 2);
        assert!(listing.contains("Dune"));
        assert!(listing.contains("Foundation"));

        let bad = text(session.execute(ShopCommand::Genre("poetry".to_string())).await);
        assert_eq!(bad, "unknown genre: poetry");
    }

    #[test]
    fn test_announce_only_on_change() {
        let mut shown = None;
        let blue = VersionInfo {
            version: "1.0.0".to_string(),
            color: "blue".to_string(),
            hostname: None,
            build_number: "1".to_string(),
        };
        assert!(announce(&mut shown, &blue));
        assert!(!announce(&mut shown, &blue));

        let green = VersionInfo {
            color: "green".to_string(),
            ..blue
        };
        assert!(announce(&mut shown, &green));
    }
}
