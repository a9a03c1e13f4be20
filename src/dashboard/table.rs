//! The table listing every transaction.

use maud::{Markup, html};

use crate::transaction::{TransactionType, ViewTransaction};

/// Renders one row per transaction, in the order given.
///
/// Each row's `id` is the transaction's ID prefixed with `transaction-`, so
/// that htmx can match rows across swaps without clashing with other IDs on
/// the page.
pub(super) fn transactions_table_view(transactions: &[ViewTransaction]) -> Markup {
    html! {
        section class="table-container" {
            table class="table" {
                thead {
                    tr {
                        th scope="col" { "Título" }
                        th scope="col" { "Preço" }
                        th scope="col" { "Categoria" }
                        th scope="col" { "Data" }
                    }
                }

                tbody {
                    @for transaction in transactions {
                        (transaction_row(transaction))
                    }
                }
            }

            @if transactions.is_empty() {
                p class="table-container__empty" { "No transactions yet." }
            }
        }
    }
}

fn transaction_row(transaction: &ViewTransaction) -> Markup {
    let value_class = transaction.transaction_type.as_str();

    html! {
        tr id=(row_id(transaction)) {
            td class="title" { (transaction.title) }
            td class=(value_class) {
                @if transaction.transaction_type == TransactionType::Outcome {
                    "- "
                }
                (transaction.formatted_value)
            }
            td { (transaction.category.title) }
            td { (transaction.formatted_date) }
        }
    }
}

fn row_id(transaction: &ViewTransaction) -> String {
    format!("transaction-{}", transaction.id)
}
