// ── Sidebar navigation state ──
//
// Groups own a fixed set of leaf items; what varies at runtime is which
// groups are expanded, whether the sidebar renders full or compact, and
// which leaf is active for the current location. Expansion and display
// mode are independent axes: collapsing to compact never forgets which
// groups were open.

use std::collections::BTreeSet;

/// A leaf destination in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub label: String,
    pub path: String,
    /// Optional count bubble (pending orders, open tickets).
    pub badge: Option<u32>,
}

impl NavItem {
    pub fn new(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
            badge: None,
        }
    }

    pub fn with_badge(mut self, count: u32) -> Self {
        self.badge = Some(count);
        self
    }
}

/// A titled, collapsible group of destinations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavGroup {
    pub label: String,
    pub items: Vec<NavItem>,
}

impl NavGroup {
    pub fn new(label: impl Into<String>, items: Vec<NavItem>) -> Self {
        Self {
            label: label.into(),
            items,
        }
    }
}

/// How the sidebar renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SidebarMode {
    /// Group headers and item labels visible; expansion honored.
    #[default]
    Full,
    /// Icons-only rail; every group renders collapsed regardless of the
    /// stored expansion set.
    Compact,
}

/// Sidebar navigation state machine.
#[derive(Debug, Clone)]
pub struct NavState {
    groups: Vec<NavGroup>,
    expanded: BTreeSet<String>,
    mode: SidebarMode,
}

impl NavState {
    /// Build the state with exactly one group (the landing group) open.
    ///
    /// An `initial` label not present in `groups` yields an empty
    /// expansion set rather than an error.
    pub fn new(groups: Vec<NavGroup>, initial: &str) -> Self {
        let mut expanded = BTreeSet::new();
        if groups.iter().any(|g| g.label == initial) {
            expanded.insert(initial.to_owned());
        }
        Self {
            groups,
            expanded,
            mode: SidebarMode::Full,
        }
    }

    pub fn groups(&self) -> &[NavGroup] {
        &self.groups
    }

    // ── Expansion ────────────────────────────────────────────────────

    /// Flip one group between expanded and collapsed. Other groups are
    /// untouched; any number may be open at once.
    ///
    /// No-op in [`SidebarMode::Compact`] and for unknown labels.
    pub fn toggle(&mut self, label: &str) {
        if self.mode == SidebarMode::Compact {
            return;
        }
        if !self.groups.iter().any(|g| g.label == label) {
            return;
        }
        if !self.expanded.remove(label) {
            self.expanded.insert(label.to_owned());
        }
    }

    /// Whether `label`'s items should render. Always false in compact
    /// mode; the stored set is consulted only when rendering full.
    pub fn is_expanded(&self, label: &str) -> bool {
        self.mode == SidebarMode::Full && self.expanded.contains(label)
    }

    // ── Display mode ─────────────────────────────────────────────────

    pub fn mode(&self) -> SidebarMode {
        self.mode
    }

    /// Change display mode. The expansion set is preserved verbatim so
    /// returning to full mode restores the previous open groups.
    pub fn set_mode(&mut self, mode: SidebarMode) {
        self.mode = mode;
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            SidebarMode::Full => SidebarMode::Compact,
            SidebarMode::Compact => SidebarMode::Full,
        };
    }

    // ── Active item ──────────────────────────────────────────────────

    /// Whether `item` is the active destination for `current`.
    ///
    /// Matching is exact string equality on the path. No prefix logic:
    /// `/admin/products` is not active on `/admin/products/42`, and a
    /// trailing slash is a different path.
    pub fn is_active(&self, item: &NavItem, current: &str) -> bool {
        item.path == current
    }

    /// The item matching `current` exactly, if any.
    pub fn active_item(&self, current: &str) -> Option<&NavItem> {
        self.groups
            .iter()
            .flat_map(|g| g.items.iter())
            .find(|item| item.path == current)
    }
}

/// The stock back-office menu, opened on the overview group.
pub fn default_tree() -> NavState {
    let groups = vec![
        NavGroup::new(
            "Overview",
            vec![
                NavItem::new("Dashboard", "/admin"),
                NavItem::new("Reports", "/admin/reports"),
            ],
        ),
        NavGroup::new(
            "Catalog",
            vec![
                NavItem::new("Products", "/admin/products"),
                NavItem::new("Categories", "/admin/categories"),
                NavItem::new("Subjects", "/admin/subjects"),
            ],
        ),
        NavGroup::new(
            "Sales",
            vec![
                NavItem::new("Orders", "/admin/orders"),
                NavItem::new("Invoices", "/admin/invoices"),
            ],
        ),
        NavGroup::new(
            "Customers",
            vec![
                NavItem::new("Accounts", "/admin/customers"),
                NavItem::new("Reviews", "/admin/reviews"),
            ],
        ),
    ];
    NavState::new(groups, "Overview")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> NavState {
        default_tree()
    }

    #[test]
    fn initial_state_expands_only_the_landing_group() {
        let nav = state();
        assert!(nav.is_expanded("Overview"));
        assert!(!nav.is_expanded("Catalog"));
        assert!(!nav.is_expanded("Sales"));
        assert_eq!(nav.mode(), SidebarMode::Full);
    }

    #[test]
    fn unknown_initial_label_expands_nothing() {
        let nav = NavState::new(state().groups().to_vec(), "Nonexistent");
        assert!(state().groups().iter().all(|g| !nav.is_expanded(&g.label)));
    }

    #[test]
    fn toggle_is_an_involution() {
        let mut nav = state();
        nav.toggle("Catalog");
        assert!(nav.is_expanded("Catalog"));
        nav.toggle("Catalog");
        assert!(!nav.is_expanded("Catalog"));
    }

    #[test]
    fn toggling_one_group_leaves_others_alone() {
        let mut nav = state();
        nav.toggle("Sales");
        assert!(nav.is_expanded("Overview"));
        assert!(nav.is_expanded("Sales"));
        assert!(!nav.is_expanded("Catalog"));
    }

    #[test]
    fn multiple_groups_may_be_open_at_once() {
        let mut nav = state();
        nav.toggle("Catalog");
        nav.toggle("Sales");
        nav.toggle("Customers");
        let open = state()
            .groups()
            .iter()
            .filter(|g| nav.is_expanded(&g.label))
            .count();
        assert_eq!(open, 4);
    }

    #[test]
    fn toggle_ignores_unknown_labels() {
        let mut nav = state();
        let before = nav.clone();
        nav.toggle("Shipping");
        assert_eq!(nav.expanded, before.expanded);
    }

    #[test]
    fn compact_mode_renders_everything_collapsed_but_keeps_the_set() {
        let mut nav = state();
        nav.toggle("Catalog");
        nav.set_mode(SidebarMode::Compact);
        assert!(!nav.is_expanded("Overview"));
        assert!(!nav.is_expanded("Catalog"));

        nav.set_mode(SidebarMode::Full);
        assert!(nav.is_expanded("Overview"));
        assert!(nav.is_expanded("Catalog"));
    }

    #[test]
    fn toggle_is_a_no_op_in_compact_mode() {
        let mut nav = state();
        nav.set_mode(SidebarMode::Compact);
        nav.toggle("Sales");
        nav.set_mode(SidebarMode::Full);
        assert!(!nav.is_expanded("Sales"));
    }

    #[test]
    fn toggle_mode_round_trips() {
        let mut nav = state();
        nav.toggle_mode();
        assert_eq!(nav.mode(), SidebarMode::Compact);
        nav.toggle_mode();
        assert_eq!(nav.mode(), SidebarMode::Full);
    }

    #[test]
    fn active_matching_is_exact_not_prefix() {
        let nav = state();
        let products = nav.active_item("/admin/products").expect("known path");
        assert_eq!(products.label, "Products");

        assert!(nav.active_item("/admin/products/42").is_none());
        assert!(nav.active_item("/admin/products/").is_none());
        assert!(!nav.is_active(products, "/admin/products/42"));
    }

    #[test]
    fn dashboard_is_not_active_on_deeper_admin_paths() {
        let nav = state();
        let dashboard = nav.active_item("/admin").expect("known path");
        assert!(!nav.is_active(dashboard, "/admin/orders"));
    }

    #[test]
    fn badge_is_carried_through() {
        let item = NavItem::new("Orders", "/admin/orders").with_badge(7);
        assert_eq!(item.badge, Some(7));
    }
}
