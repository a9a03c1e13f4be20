//! Summary cards for the balance.

use maud::{Markup, html};

use crate::balance::BalanceView;

/// Which of the three balance figures a card shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CardKind {
    Income,
    Outcome,
    Total,
}

impl CardKind {
    fn label(self) -> &'static str {
        match self {
            CardKind::Income => "Entradas",
            CardKind::Outcome => "Saídas",
            CardKind::Total => "Total",
        }
    }

    fn test_id(self) -> &'static str {
        match self {
            CardKind::Income => "balance-income",
            CardKind::Outcome => "balance-outcome",
            CardKind::Total => "balance-total",
        }
    }

    fn style(self) -> &'static str {
        match self {
            CardKind::Total => "card card--total",
            CardKind::Income | CardKind::Outcome => "card",
        }
    }

    fn icon(self) -> Markup {
        // Feather icons, https://feathericons.com
        let path = match self {
            CardKind::Income => "M12 19V5M5 12l7-7 7 7",
            CardKind::Outcome => "M12 5v14M19 12l-7 7-7-7",
            CardKind::Total => "M12 1v22M17 5H9.5a3.5 3.5 0 0 0 0 7h5a3.5 3.5 0 0 1 0 7H6",
        };

        html! {
            svg
                class="card__icon"
                aria-hidden="true"
                viewBox="0 0 24 24"
                fill="none"
                stroke="currentColor"
                stroke-width="2"
                stroke-linecap="round"
                stroke-linejoin="round"
                xmlns="http://www.w3.org/2000/svg"
            {
                path d=(path) {}
            }
        }
    }
}

/// Renders the income, outcome and total cards.
///
/// The amounts are displayed as given, nothing is recomputed here.
pub(super) fn balance_cards_view(balance: &BalanceView) -> Markup {
    html! {
        section class="cards" aria-label="Balance" {
            (balance_card(CardKind::Income, &balance.income))
            (balance_card(CardKind::Outcome, &balance.outcome))
            (balance_card(CardKind::Total, &balance.total))
        }
    }
}

fn balance_card(kind: CardKind, amount: &str) -> Markup {
    html! {
        div class=(kind.style()) {
            header class="card__header" {
                p { (kind.label()) }
                (kind.icon())
            }

            h1 class="card__amount" data-testid=(kind.test_id()) { (amount) }
        }
    }
}
