use crate::cli::{ApplyArgs, BatchArgs, EvaluateArgs, PresetsArgs, RulesCommand};
use crate::infra::{applicant_name, read_json, Envelope, Store};
use credit_sim::config::RulesConfig;
use credit_sim::credit::presets::{preset, PRESET_NAMES};
use credit_sim::credit::{
    read_csv_records, ApplicantRecord, CreditDecision, CreditEvaluator, EvaluationResult,
    EvaluationView, Installment, RuleSet,
};
use credit_sim::error::AppError;
use serde::Serialize;
use serde_json::Value;
use std::fs::File;
use tracing::{info, warn};

#[derive(Debug, Serialize)]
struct ApplicantOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    nombre: Option<String>,
    #[serde(flatten)]
    view: EvaluationView,
    #[serde(skip_serializing_if = "Option::is_none")]
    cronograma: Option<Vec<Installment>>,
}

impl ApplicantOutcome {
    fn new(record: &ApplicantRecord, result: &EvaluationResult, schedule: bool) -> Self {
        Self {
            nombre: applicant_name(record).map(str::to_string),
            view: result.view(),
            cronograma: result
                .offer()
                .filter(|_| schedule)
                .map(|offer| offer.schedule()),
        }
    }
}

#[derive(Debug, Serialize)]
struct BatchReport {
    total: usize,
    aprobados: usize,
    rechazados: usize,
    resultados: Vec<ApplicantOutcome>,
}

#[derive(Debug, Serialize)]
struct PresetReport {
    resultados: Vec<ApplicantOutcome>,
}

pub(crate) fn run_evaluate(store: &Store, args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs {
        input,
        preset: preset_name,
        schedule,
        json,
    } = args;

    let record = match (input, preset_name) {
        (Some(path), _) => match read_json(&path)? {
            Value::Object(record) => record,
            other => {
                warn!(path = %path.display(), "applicant file does not hold a JSON object");
                let result = CreditEvaluator::new(store.snapshot()).evaluate_value(&other);
                return emit_single(&ApplicantRecord::new(), &result, schedule, json);
            }
        },
        (None, name) => {
            let name = name.unwrap_or_default();
            preset(&name).ok_or(AppError::UnknownPreset(name))?
        }
    };

    let result = CreditEvaluator::new(store.snapshot()).evaluate_record(&record);
    emit_single(&record, &result, schedule, json)
}

fn emit_single(
    record: &ApplicantRecord,
    result: &EvaluationResult,
    schedule: bool,
    json: bool,
) -> Result<(), AppError> {
    if json {
        return Envelope::now(ApplicantOutcome::new(record, result, schedule)).print();
    }

    render_result(applicant_name(record), result);
    if schedule {
        if let Some(offer) = result.offer() {
            render_schedule(&offer.schedule());
        }
    }
    Ok(())
}

pub(crate) fn run_batch(store: &Store, args: BatchArgs) -> Result<(), AppError> {
    let records = read_csv_records(File::open(&args.csv)?)?;
    let evaluator = CreditEvaluator::new(store.snapshot());

    let evaluated: Vec<(ApplicantRecord, EvaluationResult)> = records
        .into_iter()
        .map(|record| {
            let result = evaluator.evaluate_record(&record);
            (record, result)
        })
        .collect();
    let approved = evaluated.iter().filter(|(_, result)| result.approved()).count();
    info!(rows = evaluated.len(), approved, "batch evaluated");

    if args.json {
        let report = BatchReport {
            total: evaluated.len(),
            aprobados: approved,
            rechazados: evaluated.len() - approved,
            resultados: evaluated
                .iter()
                .map(|(record, result)| ApplicantOutcome::new(record, result, false))
                .collect(),
        };
        return Envelope::now(report).print();
    }

    for (index, (record, result)) in evaluated.iter().enumerate() {
        let label = applicant_name(record)
            .map(str::to_string)
            .unwrap_or_else(|| format!("row {}", index + 1));
        println!("{label}: {}", one_line(result));
    }
    println!(
        "\n{} applicants | {} approved | {} declined",
        evaluated.len(),
        approved,
        evaluated.len() - approved
    );
    Ok(())
}

pub(crate) fn run_presets(store: &Store, args: PresetsArgs) -> Result<(), AppError> {
    let evaluator = CreditEvaluator::new(store.snapshot());

    let mut outcomes = Vec::new();
    for name in PRESET_NAMES {
        let record = preset(name).ok_or_else(|| AppError::UnknownPreset(name.to_string()))?;
        let result = evaluator.evaluate_record(&record);
        if args.json {
            outcomes.push(ApplicantOutcome::new(&record, &result, false));
        } else {
            println!("Preset {name}");
            render_result(applicant_name(&record), &result);
            println!();
        }
    }

    if args.json {
        Envelope::now(PresetReport {
            resultados: outcomes,
        })
        .print()?;
    }
    Ok(())
}

pub(crate) fn run_rules(
    store: &Store,
    config: &RulesConfig,
    command: RulesCommand,
) -> Result<(), AppError> {
    match command {
        RulesCommand::Show => {
            let document = store.snapshot().to_document()?;
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
        RulesCommand::Validate => render_checks(&store.snapshot()),
        RulesCommand::Apply(ApplyArgs { file }) => {
            let overrides = read_json(&file)?;
            let rules = store.apply_overrides(&overrides)?;
            println!("Rules updated from {}", file.display());
            report_destination(config);
            render_checks(&rules);
        }
        RulesCommand::Reset => {
            let rules = store.reset();
            println!("Rules reset to defaults");
            report_destination(config);
            render_checks(&rules);
        }
    }
    Ok(())
}

fn report_destination(config: &RulesConfig) {
    if config.persist {
        println!("Saved to {}", config.path.display());
    } else {
        println!("Persistence disabled; changes last for this run only");
    }
}

fn render_checks(rules: &RuleSet) {
    for line in rules.validate() {
        println!("{line}");
    }
    if !rules.is_consistent() {
        warn!("business rules failed one or more consistency checks");
    }
}

fn one_line(result: &EvaluationResult) -> String {
    match &result.decision {
        CreditDecision::Approved(offer) => format!(
            "APPROVED {} (score {}) ${:.2} at {:.2}% for {} months",
            offer.tier,
            result.score().unwrap_or_default(),
            offer.amount,
            offer.annual_rate,
            offer.term_months
        ),
        CreditDecision::Declined(reason) => format!("DECLINED {}", reason.summary()),
    }
}

fn render_result(name: Option<&str>, result: &EvaluationResult) {
    if let Some(name) = name {
        println!("Applicant: {name}");
    }

    match &result.decision {
        CreditDecision::Approved(_) => println!("Decision: APPROVED"),
        CreditDecision::Declined(reason) => {
            println!("Decision: DECLINED ({})", reason.summary());
            for violation in reason.violations() {
                println!("  - {}", violation.summary());
            }
        }
    }

    if let Some(risk) = &result.risk {
        println!("Risk profile: {} (score {}/100)", risk.tier, risk.score);
        for factor in &risk.factors {
            println!("  - {}: +{}", factor.label, factor.points);
        }
        println!(
            "Debt-to-income ratio: {:.2}%",
            risk.debt_to_income_ratio * 100.0
        );
    }

    if let Some(offer) = result.offer() {
        println!(
            "Offer: ${:.2} at {:.2}% over {} months",
            offer.amount, offer.annual_rate, offer.term_months
        );
        println!(
            "  Monthly payment ${:.2} | Total paid ${:.2} | Total interest ${:.2}",
            offer.monthly_payment, offer.total_paid, offer.total_interest
        );
    }
}

fn render_schedule(rows: &[Installment]) {
    println!("\nPeriod    Payment  Principal   Interest      Balance");
    for row in rows {
        println!(
            "{:>6} {:>10.2} {:>10.2} {:>10.2} {:>12.2}",
            row.period, row.payment, row.principal, row.interest, row.balance
        );
    }
}
