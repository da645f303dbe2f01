#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Bills,
    NewBill,
    Dashboard,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/",
            Self::Bills => "#employee/bills",
            Self::NewBill => "#employee/bill/new",
            Self::Dashboard => "#admin/dashboard",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        [Self::Login, Self::Bills, Self::NewBill, Self::Dashboard]
            .into_iter()
            .find(|route| route.path() == path)
    }
}
