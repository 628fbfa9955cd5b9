use crate::common::*;

#[doc = "Fixed query, column mapping and chart metadata for one report"]
#[derive(Debug, Clone, Copy, PartialEq, Eq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct ReportDefinition {
    id: &'static str,
    letter: char,
    query: &'static str,
    sort_column: &'static str,
    x_column: &'static str,
    y_column: &'static str,
    title: &'static str,
}

impl ReportDefinition {
    #[doc = "Axis labels are the plotted column names"]
    pub fn x_label(&self) -> &'static str {
        self.x_column
    }

    pub fn y_label(&self) -> &'static str {
        self.y_column
    }

    #[doc = "Columns the result table must carry before it can be sorted and plotted"]
    pub fn required_columns(&self) -> [&'static str; 3] {
        [self.sort_column, self.x_column, self.y_column]
    }
}

pub static USERS_BY_MONTH: ReportDefinition = ReportDefinition {
    id: "users-by-month",
    letter: 'A',
    query: "SELECT * FROM UsersByMonth",
    sort_column: "YearMonth",
    x_column: "YearMonth",
    y_column: "NewUsers",
    title: "Users by Month",
};

pub static TRANSACTIONS_BY_MONTH: ReportDefinition = ReportDefinition {
    id: "transactions-by-month",
    letter: 'B',
    query: "SELECT * FROM TransactionsByMonth",
    sort_column: "YearMonth",
    x_column: "YearMonth",
    y_column: "Transactions",
    title: "Transactions by Month",
};

/* Sorted by volume, not by category name */
pub static TRANSACTIONS_BY_PRODUCT: ReportDefinition = ReportDefinition {
    id: "transactions-by-product",
    letter: 'C',
    query: "SELECT * FROM TransactionsByProduct",
    sort_column: "Transactions",
    x_column: "maincategory",
    y_column: "Transactions",
    title: "Transactions by Product Category",
};
