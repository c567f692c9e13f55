//! The form fields shared by the new-expense and edit-expense pages.

use maud::{Markup, html};
use time::Date;

use crate::{
    expense::core::CATEGORIES,
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
};

pub struct ExpenseFormDefaults<'a> {
    pub date: Date,
    pub category: Option<&'a str>,
    pub amount: Option<f64>,
    pub description: Option<&'a str>,
    pub max_date: Date,
}

pub fn expense_form_fields(defaults: &ExpenseFormDefaults<'_>) -> Markup {
    let amount_str = defaults.amount.map(|amount| format!("{amount:.2}"));
    let amount_placeholder = amount_str.as_deref().unwrap_or("0.01");

    html! {
        div
        {
            label
                for="date"
                class=(FORM_LABEL_STYLE)
            {
                "Date"
            }

            input
                name="date"
                id="date"
                type="date"
                max=(defaults.max_date)
                value=(defaults.date)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="category"
                class=(FORM_LABEL_STYLE)
            {
                "Category"
            }

            select
                name="category"
                id="category"
                required
                class=(FORM_TEXT_INPUT_STYLE)
            {
                // The category set is open: keep a label that is not in the
                // fixed list so that editing such an expense does not
                // silently reassign it.
                @if let Some(category) = defaults.category {
                    @if !CATEGORIES.contains(&category) {
                        option value=(category) selected { (category) }
                    }
                }

                @for category in CATEGORIES {
                    @if Some(category) == defaults.category {
                        option value=(category) selected { (category) }
                    } @else {
                        option value=(category) { (category) }
                    }
                }
            }
        }

        div
        {
            label
                for="amount"
                class=(FORM_LABEL_STYLE)
            {
                "Amount ($)"
            }

            input
                name="amount"
                id="amount"
                type="number"
                step="0.01"
                min="0.01"
                placeholder=(amount_placeholder)
                value=[amount_str.as_deref()]
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="description"
                class=(FORM_LABEL_STYLE)
            {
                "Description"
            }

            input
                name="description"
                id="description"
                type="text"
                placeholder="e.g. Groceries at the supermarket"
                value=[defaults.description]
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}

#[cfg(test)]
mod form_tests {
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::expense::core::CATEGORIES;

    use super::{ExpenseFormDefaults, expense_form_fields};

    fn render_fields(defaults: &ExpenseFormDefaults<'_>) -> Html {
        let fields = expense_form_fields(defaults);
        let markup = maud::html! { form { (fields) } };
        Html::parse_document(&markup.into_string())
    }

    #[test]
    fn offers_all_categories() {
        let document = render_fields(&ExpenseFormDefaults {
            date: date!(2024 - 01 - 05),
            category: None,
            amount: None,
            description: None,
            max_date: date!(2024 - 01 - 05),
        });

        let selector = Selector::parse("select[name=category] option").unwrap();
        let options: Vec<_> = document
            .select(&selector)
            .filter_map(|option| option.value().attr("value"))
            .collect();

        assert_eq!(options, CATEGORIES);
    }

    #[test]
    fn marks_default_category_as_selected() {
        let document = render_fields(&ExpenseFormDefaults {
            date: date!(2024 - 01 - 05),
            category: Some("Bills"),
            amount: Some(42.0),
            description: Some("Power bill"),
            max_date: date!(2024 - 02 - 01),
        });

        let selector = Selector::parse("option[selected]").unwrap();
        let selected = document
            .select(&selector)
            .next()
            .and_then(|option| option.value().attr("value"));

        assert_eq!(selected, Some("Bills"));
    }

    #[test]
    fn keeps_unlisted_category_selected() {
        let document = render_fields(&ExpenseFormDefaults {
            date: date!(2024 - 01 - 05),
            category: Some("Gifts"),
            amount: Some(30.0),
            description: None,
            max_date: date!(2024 - 02 - 01),
        });

        let selected_selector = Selector::parse("option[selected]").unwrap();
        let selected = document
            .select(&selected_selector)
            .next()
            .and_then(|option| option.value().attr("value"));
        assert_eq!(selected, Some("Gifts"));

        let option_selector = Selector::parse("select[name=category] option").unwrap();
        let options: Vec<_> = document
            .select(&option_selector)
            .filter_map(|option| option.value().attr("value"))
            .collect();
        assert_eq!(options.len(), CATEGORIES.len() + 1);
        for category in CATEGORIES {
            assert!(options.contains(&category), "Missing option {category}");
        }
    }

    #[test]
    fn prefills_amount_with_two_decimal_places() {
        let document = render_fields(&ExpenseFormDefaults {
            date: date!(2024 - 01 - 05),
            category: None,
            amount: Some(7.5),
            description: None,
            max_date: date!(2024 - 02 - 01),
        });

        let selector = Selector::parse("input[name=amount]").unwrap();
        let value = document
            .select(&selector)
            .next()
            .and_then(|input| input.value().attr("value"));

        assert_eq!(value, Some("7.50"));
    }
}
