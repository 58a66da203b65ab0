pub mod navigation;
pub mod page;
pub mod profile;
pub mod visitor;

pub use navigation::{layout_for, LayoutChrome, NavItem, NavSection};
pub use page::PageId;
pub use profile::{ProfilePatch, SubscriptionStatus, UserProfile};
pub use visitor::{Role, Visitor};
