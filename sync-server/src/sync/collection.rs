use std::fmt;

/// Foreign key on a line item pointing at its order header's sync id
pub const ORDER_FK: &str = "adisyonfbid";

/// Branch identifier field on courier assignments
pub const BRANCH_FIELD: &str = "subeId";

/// Store collections used by the sync backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// 桌台
    Tables,
    Customers,
    /// 桌台付款
    TablePayments,
    /// 取消记录
    Cancellations,
    /// Order headers
    Orders,
    /// Order line items (`adisyonfbid` → order header)
    OrderItems,
    CourierAssignments,
    /// Open detail writes, see [`super::DetailJournal`]
    DetailJournal,
}

impl Collection {
    /// Collection name in the store
    pub const fn as_str(&self) -> &'static str {
        match self {
            Collection::Tables => "Masalar",
            Collection::Customers => "Customers",
            Collection::TablePayments => "MasaOdemeleri",
            Collection::Cancellations => "Iptaller",
            Collection::Orders => "Adisyonlar",
            Collection::OrderItems => "AdisyonIcerik",
            Collection::CourierAssignments => "KuryeAtama",
            Collection::DetailJournal => "AdisyonIcerikJournal",
        }
    }

    /// Human-readable name for messages
    pub const fn label(&self) -> &'static str {
        match self {
            Collection::Tables => "Table",
            Collection::Customers => "Customer",
            Collection::TablePayments => "Table payment",
            Collection::Cancellations => "Cancellation",
            Collection::Orders => "Order",
            Collection::OrderItems => "Order item",
            Collection::CourierAssignments => "Courier assignment",
            Collection::DetailJournal => "Detail write",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
