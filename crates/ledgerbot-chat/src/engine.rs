//! Turn dispatch
//!
//! One inbound event (free text or a button press) enters with the user's
//! session; the engine validates it, updates the session, possibly commits a
//! ledger mutation or runs a query, and produces the reply for the transport.
//!
//! Failure policy:
//! - validation failures keep the state and draft and re-prompt;
//! - a missing/foreign edit or remove target reports "not found" and resets
//!   the flow;
//! - a store failure keeps the state and draft so the user can retry the
//!   same step (the alternative, dropping the draft, was rejected - see
//!   DESIGN.md);
//! - report failures change nothing.

use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};
use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};

use ledgerbot_core::config::Config;
use ledgerbot_core::db::Database;
use ledgerbot_core::models::{
    money, ExpensePatch, Frequency, IncomePatch, NewExpense, NewIncome,
};
use ledgerbot_core::{advice, dashboard, report, summary};

use crate::reply::{button, Menu, Reply};
use crate::session::{step_month, ChatState, RecordKind, Session};

/// An inbound chat event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Free-text message
    Text(String),
    /// Menu button press, carrying the button's callback payload
    Selection(String),
}

/// The conversation engine
///
/// Stateless itself; all per-user state lives in the `Session` passed into
/// `handle`, which keeps different users fully independent.
pub struct Engine<'a> {
    db: &'a Database,
    cfg: &'a Config,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn month_label(month: u32, year: i32) -> String {
    format!("{:02}/{}", month, year)
}

/// Parse a strictly positive decimal amount; accepts a comma decimal
/// separator.
fn parse_positive_amount(text: &str) -> Option<Decimal> {
    let normalized = text.trim().replace(',', ".");
    let amount = Decimal::from_str(&normalized).ok()?;
    (amount > Decimal::ZERO).then_some(amount)
}

/// Parse an income line: `amount description...`
fn parse_income_line(text: &str) -> Option<(Decimal, String)> {
    let mut tokens = text.split_whitespace();
    let amount = parse_positive_amount(tokens.next()?)?;
    let description = tokens.collect::<Vec<_>>().join(" ");
    (!description.is_empty()).then_some((amount, description))
}

impl<'a> Engine<'a> {
    pub fn new(db: &'a Database, cfg: &'a Config) -> Self {
        Self { db, cfg }
    }

    /// Process one turn
    pub fn handle(&self, user: &str, session: &mut Session, event: &Event) -> Reply {
        debug!(user, state = ?session.state, ?event, "Turn");
        match event {
            Event::Selection(data) if data == "back" => {
                session.back();
                self.render(user, session)
            }
            Event::Selection(data) => self.on_selection(user, session, data),
            Event::Text(text) => self.on_text(user, session, text.trim()),
        }
    }

    // ----- selections -------------------------------------------------

    fn on_selection(&self, user: &str, session: &mut Session, data: &str) -> Reply {
        let state = session.state.clone();
        match (&state, data) {
            (ChatState::MainMenu, "m:expense") => {
                session.enter(ChatState::ExpenseKindMenu);
                self.render(user, session)
            }
            (ChatState::MainMenu, "m:income") => {
                session.enter(ChatState::AwaitingIncome);
                self.render(user, session)
            }
            (ChatState::MainMenu, "m:edit") => {
                session.enter(ChatState::EditKindMenu);
                self.render(user, session)
            }
            (ChatState::MainMenu, "m:remove") => {
                session.enter(ChatState::RemoveKindMenu);
                self.render(user, session)
            }
            (ChatState::MainMenu, "m:limit") => {
                session.enter(ChatState::AwaitingLimit);
                self.render(user, session)
            }
            (ChatState::MainMenu, "m:summary") => {
                let now = today();
                session.enter(ChatState::SummaryView {
                    month: now.month(),
                    year: now.year(),
                });
                self.render(user, session)
            }
            (ChatState::MainMenu, "m:export") => {
                let now = today();
                session.enter(ChatState::ExportView {
                    month: now.month(),
                    year: now.year(),
                });
                self.render(user, session)
            }
            (ChatState::MainMenu, "m:dashboard") => {
                let url = dashboard::dashboard_url(&self.cfg.dashboard_base_url, user);
                self.render(user, session)
                    .prepend_notice(format!("Your dashboard: {}", url))
            }

            (ChatState::ExpenseKindMenu, "kind:regular") => {
                session.draft.frequency = Some(Frequency::Regular);
                session.enter(ChatState::AwaitingAmount);
                self.render(user, session)
            }
            (ChatState::ExpenseKindMenu, "kind:fixed") => {
                session.draft.frequency = Some(Frequency::Fixed);
                session.enter(ChatState::AwaitingAmount);
                self.render(user, session)
            }

            // The "write custom" escape re-prompts the same state for free
            // text; the next text message lands as the category.
            (ChatState::AwaitingCategory, "cat:custom") => {
                Reply::with_menu("Type your category name.", Menu::new().with_back())
            }
            (ChatState::AwaitingCategory, _) if data.starts_with("cat:") => {
                let category = data.trim_start_matches("cat:").to_string();
                session.draft.category = Some(category);
                session.enter(ChatState::AwaitingPayment);
                self.render(user, session)
            }

            (ChatState::AwaitingPayment, "pay:skip") => self.commit_expense(user, session, None),
            (ChatState::AwaitingPayment, _) if data.starts_with("pay:") => {
                let payment = data.trim_start_matches("pay:").to_string();
                self.commit_expense(user, session, Some(payment))
            }

            (ChatState::EditKindMenu, _) if data.starts_with("rec:") => {
                match data.trim_start_matches("rec:").parse::<RecordKind>() {
                    Ok(kind) => {
                        session.enter(ChatState::AwaitingEditTarget(kind));
                        self.render(user, session)
                    }
                    Err(_) => self.unexpected(user, session, data),
                }
            }
            (ChatState::RemoveKindMenu, _) if data.starts_with("rec:") => {
                match data.trim_start_matches("rec:").parse::<RecordKind>() {
                    Ok(kind) => {
                        session.enter(ChatState::AwaitingRemoveTarget(kind));
                        self.render(user, session)
                    }
                    Err(_) => self.unexpected(user, session, data),
                }
            }

            (ChatState::AwaitingEditTarget(kind), _) if data.starts_with("target:") => {
                match data.trim_start_matches("target:").parse::<i64>() {
                    Ok(id) => {
                        session.draft.target_id = Some(id);
                        session.enter(ChatState::AwaitingEditAmount(*kind));
                        self.render(user, session)
                    }
                    Err(_) => self.unexpected(user, session, data),
                }
            }
            (ChatState::AwaitingRemoveTarget(kind), _) if data.starts_with("target:") => {
                match data.trim_start_matches("target:").parse::<i64>() {
                    Ok(id) => {
                        session.draft.target_id = Some(id);
                        session.enter(ChatState::AwaitingRemoveConfirm(*kind));
                        self.render(user, session)
                    }
                    Err(_) => self.unexpected(user, session, data),
                }
            }

            (ChatState::AwaitingEditAmount(kind), "keep") => {
                self.advance_edit_amount(user, session, *kind, None)
            }
            (ChatState::AwaitingEditDetail(kind), "keep") => {
                self.advance_edit_detail(user, session, *kind, None)
            }
            (ChatState::AwaitingEditPayment, "keep") => {
                self.commit_expense_edit(user, session, None)
            }

            (ChatState::AwaitingRemoveConfirm(kind), "confirm:yes") => {
                self.commit_remove(user, session, *kind)
            }
            (ChatState::AwaitingRemoveConfirm(_), "confirm:no") => {
                session.reset();
                self.render(user, session).prepend_notice("Removal cancelled.")
            }

            (ChatState::SummaryView { month, year }, "nav:prev" | "nav:next") => {
                let (month, year) = step_month(*month, *year, data == "nav:next");
                session.replace(ChatState::SummaryView { month, year });
                self.render(user, session)
            }
            (ChatState::ExportView { month, year }, "nav:prev" | "nav:next") => {
                let (month, year) = step_month(*month, *year, data == "nav:next");
                session.replace(ChatState::ExportView { month, year });
                self.render(user, session)
            }
            (ChatState::ExportView { month, year }, "export:download") => {
                self.do_export(user, session, *month, *year)
            }

            _ => self.unexpected(user, session, data),
        }
    }

    fn unexpected(&self, user: &str, session: &mut Session, data: &str) -> Reply {
        warn!(user, data, state = ?session.state, "Unexpected selection");
        self.render(user, session)
    }

    // ----- free text --------------------------------------------------

    fn on_text(&self, user: &str, session: &mut Session, text: &str) -> Reply {
        if text.is_empty() {
            return self.render(user, session);
        }
        let state = session.state.clone();
        match state {
            ChatState::AwaitingAmount => match parse_positive_amount(text) {
                Some(amount) => {
                    session.draft.amount = Some(amount);
                    session.enter(ChatState::AwaitingCategory);
                    self.render(user, session)
                }
                None => self.invalid_amount(user, session, text),
            },

            // Free text here is always accepted as the category, preset
            // buttons are just shortcuts.
            ChatState::AwaitingCategory => {
                session.draft.category = Some(text.to_string());
                session.enter(ChatState::AwaitingPayment);
                self.render(user, session)
            }

            ChatState::AwaitingPayment => self.commit_expense(user, session, Some(text.to_string())),

            ChatState::AwaitingIncome => match parse_income_line(text) {
                Some((amount, description)) => {
                    self.commit_income(user, session, amount, description)
                }
                None => {
                    debug!(user, input = text, "Invalid income line");
                    self.render(user, session).prepend_notice(
                        "I need an amount followed by a description, e.g. '2500 salary'.",
                    )
                }
            },

            ChatState::AwaitingEditAmount(kind) => {
                if text.eq_ignore_ascii_case("keep") {
                    self.advance_edit_amount(user, session, kind, None)
                } else {
                    match parse_positive_amount(text) {
                        Some(amount) => self.advance_edit_amount(user, session, kind, Some(amount)),
                        None => self.invalid_amount(user, session, text),
                    }
                }
            }
            ChatState::AwaitingEditDetail(kind) => {
                let staged = if text.eq_ignore_ascii_case("keep") {
                    None
                } else {
                    Some(text.to_string())
                };
                self.advance_edit_detail(user, session, kind, staged)
            }
            ChatState::AwaitingEditPayment => {
                let payment = if text.eq_ignore_ascii_case("keep") {
                    None
                } else {
                    Some(text.to_string())
                };
                self.commit_expense_edit(user, session, payment)
            }

            ChatState::AwaitingRemoveConfirm(kind) => {
                if text.eq_ignore_ascii_case("yes") {
                    self.commit_remove(user, session, kind)
                } else if text.eq_ignore_ascii_case("no") {
                    session.reset();
                    self.render(user, session).prepend_notice("Removal cancelled.")
                } else {
                    self.render(user, session)
                        .prepend_notice("Please answer yes or no.")
                }
            }

            ChatState::AwaitingLimit => match parse_positive_amount(text) {
                Some(amount) => match self.db.set_limit(user, amount) {
                    Ok(()) => {
                        info!(user, %amount, "Budget limit set");
                        session.reset();
                        self.render(user, session)
                            .prepend_notice(format!("Budget limit set to {}.", money(amount)))
                    }
                    Err(e) => self.store_failure(user, session, "set limit", &e),
                },
                None => self.invalid_amount(user, session, text),
            },

            // Menu and view states ignore free text: the button set is
            // closed, so an unsolicited message just re-renders the prompt.
            ChatState::MainMenu
            | ChatState::ExpenseKindMenu
            | ChatState::EditKindMenu
            | ChatState::RemoveKindMenu
            | ChatState::AwaitingEditTarget(_)
            | ChatState::AwaitingRemoveTarget(_)
            | ChatState::SummaryView { .. }
            | ChatState::ExportView { .. } => self.render(user, session),
        }
    }

    fn invalid_amount(&self, user: &str, session: &mut Session, input: &str) -> Reply {
        debug!(user, input, state = ?session.state, "Invalid amount");
        self.render(user, session)
            .prepend_notice("That doesn't look like a positive amount. Try something like 42.50.")
    }

    // ----- commits ----------------------------------------------------

    fn commit_expense(&self, user: &str, session: &mut Session, payment: Option<String>) -> Reply {
        let (Some(amount), Some(category)) = (session.draft.amount, session.draft.category.clone())
        else {
            warn!(user, "Expense commit reached without a complete draft");
            session.reset();
            return self
                .render(user, session)
                .prepend_notice("Something went wrong, let's start over.");
        };
        let kind = session.draft.frequency.unwrap_or_default();
        let date = today();

        let new = NewExpense {
            user: user.to_string(),
            amount,
            category: category.clone(),
            payment_method: payment,
            kind,
            date,
        };
        match self.db.add_expense(&new) {
            Ok(id) => {
                info!(user, id, %amount, %category, kind = kind.as_str(), "Expense recorded");
                let mut notice = format!("Saved: {} on '{}'.", money(amount), category);
                // Advisory only; the commit above stands regardless.
                match advice::check_budget(self.db, user, date.month(), date.year()) {
                    Ok(Some(alert)) => notice = format!("{}\n{}", notice, alert),
                    Ok(None) => {}
                    Err(e) => warn!(user, error = %e, "Budget check failed after commit"),
                }
                session.reset();
                self.render(user, session).prepend_notice(notice)
            }
            Err(e) => self.store_failure(user, session, "add expense", &e),
        }
    }

    fn commit_income(
        &self,
        user: &str,
        session: &mut Session,
        amount: Decimal,
        description: String,
    ) -> Reply {
        let new = NewIncome {
            user: user.to_string(),
            amount,
            description: description.clone(),
            date: today(),
        };
        match self.db.add_income(&new) {
            Ok(id) => {
                info!(user, id, %amount, %description, "Income recorded");
                session.reset();
                self.render(user, session)
                    .prepend_notice(format!("Saved income: {} '{}'.", money(amount), description))
            }
            Err(e) => self.store_failure(user, session, "add income", &e),
        }
    }

    fn advance_edit_amount(
        &self,
        user: &str,
        session: &mut Session,
        kind: RecordKind,
        staged: Option<Decimal>,
    ) -> Reply {
        session.draft.edit_amount = staged;
        session.enter(ChatState::AwaitingEditDetail(kind));
        self.render(user, session)
    }

    fn advance_edit_detail(
        &self,
        user: &str,
        session: &mut Session,
        kind: RecordKind,
        staged: Option<String>,
    ) -> Reply {
        session.draft.edit_detail = staged;
        match kind {
            RecordKind::Expense => {
                session.enter(ChatState::AwaitingEditPayment);
                self.render(user, session)
            }
            RecordKind::Income => self.commit_income_edit(user, session),
        }
    }

    fn commit_expense_edit(
        &self,
        user: &str,
        session: &mut Session,
        payment: Option<String>,
    ) -> Reply {
        let Some(id) = session.draft.target_id else {
            warn!(user, "Edit commit reached without a target");
            session.reset();
            return self
                .render(user, session)
                .prepend_notice("Something went wrong, let's start over.");
        };
        let patch = ExpensePatch {
            amount: session.draft.edit_amount,
            category: session.draft.edit_detail.clone(),
            payment_method: payment,
        };
        match self.db.edit_expense(user, id, &patch) {
            Ok(()) => {
                info!(user, id, "Expense updated");
                session.reset();
                self.render(user, session)
                    .prepend_notice(format!("Expense #{} updated.", id))
            }
            Err(e) if e.is_not_found() => self.target_not_found(user, session, id),
            Err(e) => self.store_failure(user, session, "edit expense", &e),
        }
    }

    fn commit_income_edit(&self, user: &str, session: &mut Session) -> Reply {
        let Some(id) = session.draft.target_id else {
            warn!(user, "Edit commit reached without a target");
            session.reset();
            return self
                .render(user, session)
                .prepend_notice("Something went wrong, let's start over.");
        };
        let patch = IncomePatch {
            amount: session.draft.edit_amount,
            description: session.draft.edit_detail.clone(),
        };
        match self.db.edit_income(user, id, &patch) {
            Ok(()) => {
                info!(user, id, "Income updated");
                session.reset();
                self.render(user, session)
                    .prepend_notice(format!("Income #{} updated.", id))
            }
            Err(e) if e.is_not_found() => self.target_not_found(user, session, id),
            Err(e) => self.store_failure(user, session, "edit income", &e),
        }
    }

    fn commit_remove(&self, user: &str, session: &mut Session, kind: RecordKind) -> Reply {
        let Some(id) = session.draft.target_id else {
            warn!(user, "Remove commit reached without a target");
            session.reset();
            return self
                .render(user, session)
                .prepend_notice("Something went wrong, let's start over.");
        };
        let result = match kind {
            RecordKind::Expense => self.db.remove_expense(user, id),
            RecordKind::Income => self.db.remove_income(user, id),
        };
        match result {
            Ok(()) => {
                info!(user, id, kind = kind.as_str(), "Record removed");
                session.reset();
                self.render(user, session)
                    .prepend_notice(format!("Removed {} #{}.", kind.as_str(), id))
            }
            Err(e) if e.is_not_found() => self.target_not_found(user, session, id),
            Err(e) => self.store_failure(user, session, "remove record", &e),
        }
    }

    fn target_not_found(&self, user: &str, session: &mut Session, id: i64) -> Reply {
        info!(user, id, "Edit/remove target not found");
        session.reset();
        self.render(user, session)
            .prepend_notice("That record was not found.")
    }

    fn store_failure(
        &self,
        user: &str,
        session: &mut Session,
        operation: &str,
        err: &ledgerbot_core::Error,
    ) -> Reply {
        error!(user, operation, error = %err, "Ledger store failure");
        // State and draft are preserved: the user retries the same step.
        self.render(user, session).prepend_notice(
            "The ledger is unavailable right now. Nothing was saved - please try again.",
        )
    }

    fn do_export(&self, user: &str, session: &mut Session, month: u32, year: i32) -> Reply {
        let path = std::env::temp_dir().join(report::report_file_name(user, month, year));
        match report::write_monthly_report(self.db, user, month, year, &path) {
            Ok(_) => self.render(user, session).prepend_notice(format!(
                "Report for {} saved to {}.",
                month_label(month, year),
                path.display()
            )),
            Err(e) => {
                error!(user, month, year, error = %e, "Report rendering failed");
                self.render(user, session)
                    .prepend_notice("Could not generate the report. Try again later.")
            }
        }
    }

    // ----- rendering --------------------------------------------------

    /// Produce the prompt and menu for the session's current state.
    ///
    /// Back relies on this: popping the stack and re-rendering restores the
    /// exact prior prompt, with whatever draft fields were already filled.
    fn render(&self, user: &str, session: &mut Session) -> Reply {
        let state = session.state.clone();
        match state {
            ChatState::MainMenu => Reply::with_menu("What would you like to do?", self.main_menu()),

            ChatState::ExpenseKindMenu => Reply::with_menu(
                "Is this a regular or a fixed monthly expense?",
                Menu::new()
                    .row(vec![
                        button("Regular", "kind:regular"),
                        button("Fixed monthly", "kind:fixed"),
                    ])
                    .with_back(),
            ),

            ChatState::AwaitingAmount => Reply::with_menu(
                "Send the amount, e.g. 42.50.",
                Menu::new().with_back(),
            ),

            ChatState::AwaitingCategory => {
                let mut menu = Menu::new();
                for pair in self.cfg.preset_categories.chunks(2) {
                    menu = menu.row(
                        pair.iter()
                            .map(|c| button(c.clone(), format!("cat:{}", c)))
                            .collect(),
                    );
                }
                menu = menu.row(vec![button("Other\u{2026}", "cat:custom")]).with_back();
                Reply::with_menu("Pick a category or type your own.", menu)
            }

            ChatState::AwaitingPayment => {
                let mut menu = Menu::new();
                for pair in self.cfg.preset_payment_methods.chunks(2) {
                    menu = menu.row(
                        pair.iter()
                            .map(|p| button(p.clone(), format!("pay:{}", p)))
                            .collect(),
                    );
                }
                menu = menu.row(vec![button("Skip", "pay:skip")]).with_back();
                Reply::with_menu("How did you pay? Pick one, type your own, or skip.", menu)
            }

            ChatState::AwaitingIncome => Reply::with_menu(
                "Send the income as 'amount description', e.g. '2500 salary'.",
                Menu::new().with_back(),
            ),

            ChatState::EditKindMenu => Reply::with_menu("Edit what?", self.kind_menu()),
            ChatState::RemoveKindMenu => Reply::with_menu("Remove what?", self.kind_menu()),

            ChatState::AwaitingEditTarget(kind) => {
                self.render_target_list(user, kind, "edit")
            }
            ChatState::AwaitingRemoveTarget(kind) => {
                self.render_target_list(user, kind, "remove")
            }

            ChatState::AwaitingEditAmount(_) => Reply::with_menu(
                "Send the new amount, or keep the current one.",
                Menu::new().row(vec![button("Keep", "keep")]).with_back(),
            ),
            ChatState::AwaitingEditDetail(kind) => {
                let field = match kind {
                    RecordKind::Expense => "category",
                    RecordKind::Income => "description",
                };
                Reply::with_menu(
                    format!("Send the new {}, or keep the current one.", field),
                    Menu::new().row(vec![button("Keep", "keep")]).with_back(),
                )
            }
            ChatState::AwaitingEditPayment => Reply::with_menu(
                "Send the new payment method, or keep the current one.",
                Menu::new().row(vec![button("Keep", "keep")]).with_back(),
            ),

            ChatState::AwaitingRemoveConfirm(kind) => {
                let id = session.draft.target_id.unwrap_or_default();
                Reply::with_menu(
                    format!(
                        "Remove {} #{}? This cannot be undone.",
                        kind.as_str(),
                        id
                    ),
                    Menu::new()
                        .row(vec![
                            button("Yes, remove it", "confirm:yes"),
                            button("No, keep it", "confirm:no"),
                        ])
                        .with_back(),
                )
            }

            ChatState::AwaitingLimit => Reply::with_menu(
                "Send your monthly budget limit, e.g. 1500.",
                Menu::new().with_back(),
            ),

            ChatState::SummaryView { month, year } => self.render_summary(user, month, year),

            ChatState::ExportView { month, year } => Reply::with_menu(
                format!("Export the CSV report for {}?", month_label(month, year)),
                Menu::new()
                    .row(vec![button("Download", "export:download")])
                    .row(vec![
                        button("\u{2039} Prev", "nav:prev"),
                        button("Next \u{203a}", "nav:next"),
                    ])
                    .with_back(),
            ),
        }
    }

    fn main_menu(&self) -> Menu {
        Menu::new()
            .row(vec![
                button("New expense", "m:expense"),
                button("New income", "m:income"),
            ])
            .row(vec![button("Edit", "m:edit"), button("Remove", "m:remove")])
            .row(vec![
                button("Summary", "m:summary"),
                button("Export", "m:export"),
            ])
            .row(vec![
                button("Budget limit", "m:limit"),
                button("Dashboard", "m:dashboard"),
            ])
    }

    fn kind_menu(&self) -> Menu {
        Menu::new()
            .row(vec![
                button("Expenses", "rec:expense"),
                button("Incomes", "rec:income"),
            ])
            .with_back()
    }

    /// One button per matching record in the current month
    fn render_target_list(&self, user: &str, kind: RecordKind, verb: &str) -> Reply {
        let now = today();
        let (month, year) = (now.month(), now.year());

        let buttons: Result<Vec<(String, i64)>, ledgerbot_core::Error> = match kind {
            RecordKind::Expense => self.db.list_expenses(user, Some(month), Some(year)).map(|v| {
                v.iter()
                    .map(|e| {
                        (
                            format!("#{} {} {}", e.id, e.category, money(e.amount)),
                            e.id,
                        )
                    })
                    .collect()
            }),
            RecordKind::Income => self.db.list_incomes(user, Some(month), Some(year)).map(|v| {
                v.iter()
                    .map(|i| {
                        (
                            format!("#{} {} {}", i.id, i.description, money(i.amount)),
                            i.id,
                        )
                    })
                    .collect()
            }),
        };

        match buttons {
            Ok(entries) if entries.is_empty() => Reply::with_menu(
                format!("You have no {}s recorded this month.", kind.as_str()),
                Menu::new().with_back(),
            ),
            Ok(entries) => {
                let mut menu = Menu::new();
                for (label, id) in entries {
                    menu = menu.row(vec![button(label, format!("target:{}", id))]);
                }
                Reply::with_menu(
                    format!("Pick the {} to {}.", kind.as_str(), verb),
                    menu.with_back(),
                )
            }
            Err(e) => {
                error!(user, kind = kind.as_str(), error = %e, "Listing records failed");
                Reply::with_menu(
                    "The ledger is unavailable right now. Please try again.",
                    Menu::new().with_back(),
                )
            }
        }
    }

    fn render_summary(&self, user: &str, month: u32, year: i32) -> Reply {
        let nav = Menu::new()
            .row(vec![
                button("\u{2039} Prev", "nav:prev"),
                button("Next \u{203a}", "nav:next"),
            ])
            .with_back();

        match summary::monthly_summary(self.db, user, month, year) {
            Ok(s) if s.is_empty() => Reply::with_menu(
                format!("No records for {}.", month_label(month, year)),
                nav,
            ),
            Ok(s) => {
                let mut text = format!("Summary for {}:\n", month_label(month, year));
                for (category, total) in &s.categories {
                    text.push_str(&format!("- {}: {}\n", category, money(*total)));
                }
                text.push_str(&format!(
                    "\nTotal expenses: {}\nTotal incomes: {}\nBalance: {}\n\n{}",
                    money(s.total_expenses),
                    money(s.total_incomes),
                    money(s.balance),
                    advice::recommendation(self.cfg, &s)
                ));
                Reply::with_menu(text, nav)
            }
            Err(e) => {
                error!(user, month, year, error = %e, "Summary query failed");
                Reply::with_menu(
                    "The ledger is unavailable right now. Please try again.",
                    nav,
                )
            }
        }
    }
}
