//! Sidebar navigation model for the application shell.

use serde::Serialize;

use super::PageId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub page: PageId,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavSection {
    /// `None` for the untitled main section.
    pub title: Option<&'static str>,
    pub items: Vec<NavItem>,
}

/// How the shell frames the requested page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LayoutChrome {
    /// Public pages render without the sidebar.
    Bare,
    Sidebar { sections: Vec<NavSection> },
}

const MAIN_ITEMS: [(&str, PageId); 6] = [
    ("Dashboard", PageId::Dashboard),
    ("AI Companion", PageId::Companion),
    ("Calendar", PageId::Calendar),
    ("Check-in", PageId::Checkin),
    ("Journal", PageId::Journal),
    ("Exercises", PageId::Exercises),
];

const SETTINGS_ITEMS: [(&str, PageId); 2] = [
    ("Settings", PageId::Settings),
    ("Profile", PageId::Profile),
];

const ADMIN_ITEMS: [(&str, PageId); 1] = [("Admin Panel", PageId::Admin)];

fn section(title: Option<&'static str>, items: &[(&'static str, PageId)], current: PageId) -> NavSection {
    NavSection {
        title,
        items: items
            .iter()
            .map(|&(label, page)| NavItem {
                label,
                page,
                active: page == current,
            })
            .collect(),
    }
}

/// Layout for `current`. The admin section only appears for admin visitors.
pub fn layout_for(current: PageId, is_admin: bool) -> LayoutChrome {
    if current.is_public() {
        return LayoutChrome::Bare;
    }

    let mut sections = vec![
        section(None, &MAIN_ITEMS, current),
        section(Some("Settings"), &SETTINGS_ITEMS, current),
    ];
    if is_admin {
        sections.push(section(Some("Admin"), &ADMIN_ITEMS, current));
    }
    LayoutChrome::Sidebar { sections }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_pages_are_bare() {
        for page in PageId::PUBLIC {
            assert_eq!(layout_for(page, true), LayoutChrome::Bare);
        }
    }

    #[test]
    fn admin_section_only_for_admins() {
        let LayoutChrome::Sidebar { sections } = layout_for(PageId::Journal, false) else {
            panic!("expected sidebar");
        };
        assert_eq!(sections.len(), 2);

        let LayoutChrome::Sidebar { sections } = layout_for(PageId::Admin, true) else {
            panic!("expected sidebar");
        };
        assert_eq!(sections.len(), 3);
        assert!(sections[2].items[0].active);
    }

    #[test]
    fn exactly_one_item_active() {
        let LayoutChrome::Sidebar { sections } = layout_for(PageId::Checkin, false) else {
            panic!("expected sidebar");
        };
        let active: Vec<_> = sections
            .iter()
            .flat_map(|s| s.items.iter())
            .filter(|i| i.active)
            .collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].label, "Check-in");
    }
}
