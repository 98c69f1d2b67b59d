use std::{env, error::Error, process, sync::Arc};

use chrono::{NaiveDate, NaiveTime, Weekday};
use colored::Colorize;

use piggy_ledger::{
    init,
    piggy_config::{Currency, Settings},
    piggy_core::{StatisticsService, RECENT_TRANSACTIONS_LIMIT},
    piggy_domain::{DailySummaryRecord, ExpenseCategory, Period, PlannedExpense},
    utils::paths::app_data_dir,
    Engine, EngineError, NotificationSink, StatusReport, SystemClock,
};

fn main() {
    init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        print_usage();
        process::exit(1);
    };

    let mut engine = Engine::open_at(&app_data_dir(), Arc::new(SystemClock))?;
    let currency = engine.settings().currency.symbol();

    match command.as_str() {
        "status" => {
            let report = engine.status();
            if rest.first().map(String::as_str) == Some("--json") {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_status(&report);
            }
        }
        "activate" => {
            engine.activate();
            let mut sink = ConsoleSink { currency };
            if engine.deliver_signals(&mut sink) == 0 {
                println!("No daily summary to show.");
            }
        }
        "budget" => {
            let [period, amount] = rest else {
                usage_error();
            };
            let period = parse_period(period)?;
            let amount = parse_amount(amount)?;
            engine.set_budget(period, amount);
            println!("{} budget set to {}", period, money(amount, currency).green());
        }
        "spend" => {
            let [amount, category, title @ ..] = rest else {
                usage_error();
            };
            let amount = parse_amount(amount)?;
            let title = join_title(title)?;
            let expense = engine.add_expense(title, amount, ExpenseCategory::parse(category));
            println!(
                "Logged {} for {} ({}) at {}",
                money(expense.amount, currency),
                expense.title,
                expense.category,
                expense.time_label
            );
            let remaining = engine.finance().daily_remaining();
            let line = format!("Remaining today: {}", money(remaining, currency));
            if remaining < 0.0 {
                println!("{}", line.red());
            } else {
                println!("{}", line.green());
            }
        }
        "plan" => {
            let [period, amount, category, title @ ..] = rest else {
                usage_error();
            };
            let period = parse_period(period)?;
            let amount = parse_amount(amount)?;
            let mut expense =
                PlannedExpense::new(join_title(title)?, amount, ExpenseCategory::parse(category));
            if period == Period::Day {
                expense = expense.on(engine.today());
            }
            engine.add_planned_expense(period, expense);
            println!(
                "Planned {} for the {} budget; {} planned in total",
                money(amount, currency),
                period.to_string().to_lowercase(),
                money(engine.finance().plan(period).total_planned(), currency)
            );
        }
        "goal" => {
            let [target, deadline, title @ ..] = rest else {
                usage_error();
            };
            let target = parse_amount(target)?;
            let deadline = parse_date(deadline)?;
            let goal = engine.create_goal(join_title(title)?, target, deadline)?;
            println!(
                "Saving for {}: {} by {}",
                goal.title.bold(),
                money(goal.target_amount, currency),
                goal.deadline
            );
        }
        "save" => {
            let (amount, date) = match rest {
                [amount] => (amount, None),
                [amount, date] => (amount, Some(parse_date(date)?)),
                _ => usage_error(),
            };
            let saving = engine.add_saving(parse_amount(amount)?, date, None)?;
            println!(
                "Saved {} on {}",
                money(saving.amount, currency).green(),
                saving.date
            );
        }
        "withdraw" => {
            let completed = engine.withdraw()?;
            println!(
                "Withdrew {} from {}",
                money(completed.achieved_amount, currency).green(),
                completed.title.bold()
            );
            engine.deliver_signals(&mut ConsoleSink { currency });
        }
        "dismiss" => {
            engine.activate();
            match engine.dismiss_summary() {
                Some(day) => println!("Summary for {day} marked as viewed."),
                None => println!("No daily summary to dismiss."),
            }
        }
        "settings" => {
            let mut settings = engine.settings().clone();
            match rest {
                [] => {}
                [key, values @ ..] => {
                    apply_setting(&mut settings, key, values)?;
                    engine.update_settings(settings.clone());
                }
            }
            print_settings(&settings);
        }
        "stats" => {
            let today = engine.today();
            let ledger = engine.finance();
            println!("{}", "Last 7 days".bold());
            for total in StatisticsService::category_breakdown(ledger, today) {
                println!(
                    "  {:<14} {:>12} {:>5.1}%",
                    total.category.to_string(),
                    money(total.amount, currency),
                    total.share * 100.0
                );
            }
            println!("{}", "Recent".bold());
            for expense in
                StatisticsService::recent_transactions(ledger, today, RECENT_TRANSACTIONS_LIMIT)
            {
                println!(
                    "  {} {} {}",
                    expense.date.format("%Y-%m-%d %H:%M"),
                    expense.title,
                    money(expense.amount, currency)
                );
            }
        }
        _ => {
            print_usage();
            process::exit(1);
        }
    }

    engine.flush()?;
    Ok(())
}

struct ConsoleSink {
    currency: &'static str,
}

impl NotificationSink for ConsoleSink {
    fn present_summary(&mut self, record: &DailySummaryRecord) {
        println!("{}", format!("Daily summary for {}", record.date).bold());
        println!("  Budget: {}", money(record.budget, self.currency));
        println!("  Spent:  {}", money(record.spent, self.currency));
        if record.overspent() {
            println!(
                "  {}",
                format!(
                    "Over budget by {}",
                    money(record.spent - record.budget, self.currency)
                )
                .red()
            );
        } else {
            println!(
                "  {}",
                format!("Saved:  {}", money(record.saved, self.currency)).green()
            );
        }
    }

    fn prompt_new_goal(&mut self) {
        println!("Set a new goal with `goal <target> <YYYY-MM-DD> <title>`.");
    }
}

fn print_status(report: &StatusReport) {
    let currency = report.currency;
    println!("{}", format!("Status for {}", report.date).bold());
    println!("  Daily budget:   {}", money(report.daily_budget, currency));
    println!("  Weekly budget:  {}", money(report.weekly_budget, currency));
    println!("  Monthly budget: {}", money(report.monthly_budget, currency));
    println!(
        "  Spent today:    {} ({:.0}%)",
        money(report.today_spent, currency),
        report.spent_percentage * 100.0
    );
    println!("  Remaining:      {}", money(report.daily_remaining, currency));
    match &report.goal {
        Some(goal) => {
            println!(
                "  Goal:           {} {} / {} ({:.0}%)",
                goal.title.bold(),
                money(goal.current_amount, currency),
                money(goal.target_amount, currency),
                goal.progress_percentage
            );
            if goal.completed {
                println!("  {}", "Goal reached; run `withdraw` to collect it.".green());
            } else {
                println!(
                    "  Put aside {} a day for {} more days",
                    money(goal.recommended_daily_amount, currency),
                    goal.days_remaining
                );
            }
        }
        None => println!("  Goal:           none"),
    }
    println!("  Total saved:    {}", money(report.total_saved, currency));
}

fn apply_setting(
    settings: &mut Settings,
    key: &str,
    values: &[String],
) -> Result<(), EngineError> {
    let value = values.join(" ");
    match key {
        "currency" => {
            settings.currency = Currency::parse(&value).ok_or_else(|| {
                EngineError::Input(format!("`{value}` is not one of ruble, dollar, euro, pound"))
            })?;
        }
        "summary" => {
            settings.daily_summary_enabled = match value.trim().to_ascii_lowercase().as_str() {
                "on" | "true" | "yes" => true,
                "off" | "false" | "no" => false,
                _ => return Err(EngineError::Input(format!("`{value}` is not on or off"))),
            };
        }
        "summary-time" => {
            settings.daily_summary_time = NaiveTime::parse_from_str(value.trim(), "%H:%M")
                .map_err(|_| EngineError::Input(format!("`{value}` is not a HH:MM time")))?;
        }
        "week-start" => {
            settings.week_start = value
                .trim()
                .parse::<Weekday>()
                .map_err(|_| EngineError::Input(format!("`{value}` is not a weekday")))?;
        }
        "name" => {
            let [first, last @ ..] = values else {
                return Err(EngineError::Input("a first name is required".into()));
            };
            settings.first_name = first.clone();
            settings.last_name = last.join(" ");
        }
        _ => {
            return Err(EngineError::Input(format!(
                "`{key}` is not one of currency, summary, summary-time, week-start, name"
            )))
        }
    }
    Ok(())
}

fn print_settings(settings: &Settings) {
    println!("{}", "Settings".bold());
    if !settings.full_name().is_empty() {
        println!("  Name:           {}", settings.full_name());
    }
    println!("  Currency:       {}", settings.currency.symbol());
    let summary = if settings.daily_summary_enabled {
        format!("on at {}", settings.daily_summary_time.format("%H:%M"))
    } else {
        "off".to_string()
    };
    println!("  Daily summary:  {summary}");
    println!("  Week starts on: {}", settings.week_start);
}

fn money(amount: f64, currency: &str) -> String {
    format!("{amount:.2}{currency}")
}

fn parse_amount(value: &str) -> Result<f64, EngineError> {
    value
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| EngineError::Input(format!("`{value}` is not an amount")))
}

fn parse_period(value: &str) -> Result<Period, EngineError> {
    Period::parse(value)
        .ok_or_else(|| EngineError::Input(format!("`{value}` is not one of day, week, month")))
}

fn parse_date(value: &str) -> Result<NaiveDate, EngineError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| EngineError::Input(format!("`{value}` is not a YYYY-MM-DD date")))
}

fn join_title(words: &[String]) -> Result<String, EngineError> {
    let title = words.join(" ");
    if title.trim().is_empty() {
        return Err(EngineError::Input("a title is required".into()));
    }
    Ok(title)
}

fn usage_error() -> ! {
    print_usage();
    process::exit(1);
}

fn print_usage() {
    eprintln!(
        "Usage: piggy_ledger_cli <command>\n\
         \n\
         Commands:\n\
         \x20 status [--json]                          Show budgets, spending and the savings goal\n\
         \x20 activate                                 Roll over the day and show a pending summary\n\
         \x20 budget <day|week|month> <amount>         Set a period budget\n\
         \x20 spend <amount> <category> <title...>     Log an expense for today\n\
         \x20 plan <period> <amount> <category> <title...>  Add a planned expense\n\
         \x20 goal <target> <YYYY-MM-DD> <title...>    Start a savings goal\n\
         \x20 save <amount> [YYYY-MM-DD]               Put money into the piggy bank\n\
         \x20 withdraw                                 Collect a completed goal\n\
         \x20 dismiss                                  Mark the pending summary as viewed\n\
         \x20 stats                                    Spending over the last 7 days\n\
         \x20 settings [<key> <value...>]              Show or change currency, summary,\n\
         \x20                                          summary-time, week-start, name\n\
         \n\
         Data is stored in $PIGGY_LEDGER_HOME or ~/.piggy_ledger."
    );
}
