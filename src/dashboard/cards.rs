//! Card components for displaying headline spending figures.

use maud::{Markup, html};

use crate::html::format_currency;

const CARD_STYLE: &str = "flex flex-col items-center justify-center p-6 \
    bg-gray-50 dark:bg-gray-800 rounded-lg shadow";

/// Renders the headline cards shown at the top of the dashboard:
/// total spending across all recorded expenses and the expense count.
pub(super) fn summary_cards(total_spending: f64, expense_count: usize) -> Markup {
    html!(
        section
            id="summary-cards"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 sm:grid-cols-2 gap-4"
            {
                div class=(CARD_STYLE)
                {
                    span class="text-sm font-medium text-gray-500 dark:text-gray-400"
                    {
                        "Total Spending"
                    }

                    span class="text-3xl font-bold"
                    {
                        (format_currency(total_spending))
                    }
                }

                div class=(CARD_STYLE)
                {
                    span class="text-sm font-medium text-gray-500 dark:text-gray-400"
                    {
                        "Expenses Recorded"
                    }

                    span class="text-3xl font-bold"
                    {
                        (expense_count)
                    }
                }
            }
        }
    )
}

#[cfg(test)]
mod summary_cards_tests {
    use scraper::Html;

    use super::summary_cards;

    #[test]
    fn cards_show_formatted_total_and_count() {
        let markup = summary_cards(1234.5, 3);

        let document = Html::parse_fragment(&markup.into_string());
        let text: String = document.root_element().text().collect();

        assert!(text.contains("$1,234.50"), "Got text: {text}");
        assert!(text.contains("3"), "Got text: {text}");
    }
}
