//! Defines the route handler for the page that records a new expense.

use axum::{http::StatusCode, response::Response};
use maud::html;
use time::OffsetDateTime;

use crate::{
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base},
    navigation::NavBar,
    shared_templates::render,
};

use super::form::{ExpenseFormDefaults, expense_form_fields};

/// Renders the page for recording an expense.
pub async fn get_new_expense_page() -> Response {
    let nav_bar = NavBar::new(endpoints::NEW_EXPENSE_VIEW).into_html();
    let today = OffsetDateTime::now_utc().date();

    let form_fields = expense_form_fields(&ExpenseFormDefaults {
        date: today,
        category: None,
        amount: None,
        description: None,
        max_date: today,
    });

    let content = html!(
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold leading-tight tracking-tight md:text-2xl my-4"
            {
                "Add New Expense"
            }

            form
                action=(endpoints::EXPENSES_API)
                method="post"
                class="space-y-4 w-full"
            {
                (form_fields)

                button type="submit" class=(BUTTON_PRIMARY_STYLE)
                {
                    "Save Expense"
                }
            }
        }
    );

    render(StatusCode::OK, base("Add Expense", &[], &content))
}

#[cfg(test)]
mod view_tests {
    use axum::{body::Body, http::Response};
    use scraper::{Html, Selector};

    use crate::endpoints;

    use super::get_new_expense_page;

    #[tokio::test]
    async fn new_expense_page_returns_form() {
        let response = get_new_expense_page().await;

        assert!(response.status().is_success());
        let document = parse_html(response).await;
        assert_valid_html(&document);
        assert_correct_form(&document);
    }

    async fn parse_html(response: Response<Body>) -> Html {
        let body = response.into_body();
        let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        let text = String::from_utf8_lossy(&body).to_string();

        Html::parse_document(&text)
    }

    #[track_caller]
    fn assert_valid_html(html: &Html) {
        assert!(
            html.errors.is_empty(),
            "Got HTML parsing errors: {:?}",
            html.errors
        );
    }

    #[track_caller]
    fn assert_correct_form(document: &Html) {
        let form_selector = Selector::parse("form").unwrap();
        let form = document.select(&form_selector).next().expect("No form found");

        assert_eq!(form.value().attr("action"), Some(endpoints::EXPENSES_API));
        assert_eq!(form.value().attr("method"), Some("post"));

        for name in ["date", "category", "amount", "description"] {
            let selector = Selector::parse(&format!("[name={name}]")).unwrap();
            assert!(
                document.select(&selector).next().is_some(),
                "Form is missing input for {name}"
            );
        }
    }
}
