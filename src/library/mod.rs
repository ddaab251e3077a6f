// Library module - catalog browsing overlay that hands off to the player
mod browser;
mod view;

pub use browser::LibraryBrowser;
pub use view::LibraryView;
