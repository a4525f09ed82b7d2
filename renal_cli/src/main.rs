use clap::{Args, Parser, Subcommand};
use renal_core::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "renalcalc")]
#[command(about = "Bedside renal replacement therapy calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Render decimals with a comma (bedside chart convention)
    #[arg(long, global = true)]
    decimal_comma: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Effluent dose and filtration fraction for a continuous circuit
    Effluent(EffluentArgs),

    /// Bicarbonate to add to the stocked baths for a target concentration
    Bicarbonate {
        /// Target bicarbonate (mmol/L)
        #[arg(long)]
        target: Option<String>,
    },

    /// Sodium correction of the replacement bags
    Sodium {
        #[command(subcommand)]
        command: SodiumCommands,
    },

    /// Select the anticoagulation strategy for the circuit
    Anticoag {
        /// Systemic anticoagulation independently indicated? (yes/no)
        #[arg(long)]
        systemic: Option<String>,

        /// Citrate contraindicated? (yes/no)
        #[arg(long)]
        citrate_contraindicated: Option<String>,

        /// High bleeding risk? (yes/no)
        #[arg(long)]
        bleeding_risk: Option<String>,
    },

    /// Weight-indexed starting prescription for a strategy
    Prescribe {
        #[command(subcommand)]
        command: PrescribeCommands,
    },

    /// Titrate a running circuit from a new measurement
    Titrate {
        #[command(subcommand)]
        command: TitrateCommands,
    },

    /// SLED session dosing
    Sled(SledArgs),

    /// Conventional hemodialysis session dosing
    Hd(HdArgs),

    /// Evaluate a JSON input record and print the result record as JSON
    ///
    /// Intended for batch harnesses: the record carries the calculator name
    /// and its full input set, and the output preserves signed values and
    /// applicability tags.
    Eval {
        /// Path to the JSON input record ("-" reads stdin)
        file: String,
    },
}

/// One self-contained calculation request, as a tagged JSON record
#[derive(serde::Deserialize)]
#[serde(tag = "calculator", content = "inputs", rename_all = "snake_case")]
enum EvalRequest {
    Effluent(EffluentInputs),
    Bicarbonate(BicarbonateInputs),
    Hypernatremia(HypernatremiaInputs),
    Hyponatremia(HyponatremiaInputs),
    Anticoagulation(AnticoagInputs),
    AcidBase(AcidBaseInputs),
    Sled(SledInputs),
    Hemodialysis(HemodialysisInputs),
}

#[derive(Args)]
struct EffluentArgs {
    /// Pre-blood-pump replacement rate (mL/h)
    #[arg(long)]
    pre_blood_pump: Option<String>,

    /// Pre-filter replacement rate (mL/h)
    #[arg(long)]
    pre_filter: Option<String>,

    /// Dialysate rate (mL/h)
    #[arg(long)]
    dialysate: Option<String>,

    /// Post-filter replacement rate (mL/h)
    #[arg(long)]
    post_filter: Option<String>,

    /// Net ultrafiltration rate (mL/h)
    #[arg(long)]
    uf: Option<String>,

    /// Blood-pump flow (mL/min)
    #[arg(long)]
    blood_flow: Option<String>,

    /// Hematocrit (%)
    #[arg(long)]
    hematocrit: Option<String>,

    /// Body weight (kg)
    #[arg(long)]
    weight: Option<String>,
}

#[derive(Subcommand)]
enum SodiumCommands {
    /// Hypernatremia: NaCl 20% bag adjustment and 3% saline infusion
    Hyper {
        /// Target sodium (mEq/L)
        #[arg(long)]
        target: Option<String>,

        /// Current effluent dose (mL/h)
        #[arg(long)]
        effluent: Option<String>,
    },

    /// Hyponatremia: free-water bag adjustment and dextrose infusion
    Hypo {
        /// Target sodium (mEq/L)
        #[arg(long)]
        target: Option<String>,

        /// Current effluent dose (mL/h)
        #[arg(long)]
        effluent: Option<String>,
    },
}

#[derive(Subcommand)]
enum PrescribeCommands {
    /// Citrate circuit (nine-row weight table)
    Citrate {
        /// Body weight (kg)
        #[arg(long)]
        weight: String,
    },

    /// Heparin circuit (linear weight scaling)
    Heparin {
        /// Body weight (kg)
        #[arg(long)]
        weight: String,
    },

    /// Circuit without anticoagulation
    NoAnticoagulation {
        /// Body weight (kg)
        #[arg(long)]
        weight: String,
    },
}

#[derive(Subcommand)]
enum TitrateCommands {
    /// Citrate dose from the post-filter ionized calcium
    Citrate {
        /// Post-filter ionized calcium (mmol/L)
        #[arg(long)]
        post_filter_calcium: Option<String>,
    },

    /// Calcium infusion from the systemic ionized calcium
    Calcium {
        /// Systemic ionized calcium (mmol/L)
        #[arg(long)]
        systemic_calcium: Option<String>,

        /// Current calcium infusion rate (mL/h)
        #[arg(long)]
        current_rate: Option<String>,
    },

    /// Acid-base and citrate-accumulation assessment
    AcidBase {
        /// Total calcium (mg/dL)
        #[arg(long)]
        total_calcium: Option<String>,

        /// Systemic ionized calcium (mmol/L)
        #[arg(long)]
        ionized_calcium: Option<String>,

        /// Arterial pH
        #[arg(long)]
        ph: Option<String>,

        /// Bicarbonate (mmol/L)
        #[arg(long)]
        bicarbonate: Option<String>,
    },

    /// Heparin infusion from the aPTT ratio
    Heparin {
        /// Measured aPTT ratio
        #[arg(long)]
        apttr: Option<String>,

        /// Active bleeding
        #[arg(long)]
        bleeding: bool,
    },
}

#[derive(Args)]
struct SledArgs {
    /// Blood-pump flow (mL/min)
    #[arg(long)]
    blood_flow: Option<String>,

    /// Session duration (h)
    #[arg(long)]
    duration: Option<String>,

    /// Body weight (kg)
    #[arg(long)]
    weight: Option<String>,

    /// Planned total ultrafiltration (mL)
    #[arg(long)]
    total_uf: Option<String>,

    /// Bath sodium (mEq/L)
    #[arg(long)]
    bath_sodium: Option<String>,

    /// Patient sodium (mEq/L)
    #[arg(long)]
    patient_sodium: Option<String>,

    /// Bath bicarbonate (mmol/L)
    #[arg(long)]
    bath_bicarbonate: Option<String>,

    /// Patient bicarbonate (mmol/L)
    #[arg(long)]
    patient_bicarbonate: Option<String>,

    /// Patient potassium (mmol/L)
    #[arg(long)]
    patient_potassium: Option<String>,
}

#[derive(Args)]
struct HdArgs {
    /// Blood-pump flow (mL/min)
    #[arg(long)]
    blood_flow: Option<String>,

    /// Prescribed dialysate flow (mL/min)
    #[arg(long)]
    dialysate_flow: Option<String>,

    /// Session duration (h)
    #[arg(long)]
    duration: Option<String>,

    /// Body weight (kg)
    #[arg(long)]
    weight: Option<String>,

    /// Planned total ultrafiltration (mL)
    #[arg(long)]
    total_uf: Option<String>,
}

fn main() -> Result<()> {
    // Results go to stdout; keep routine logs out of the way unless asked
    // for via RUST_LOG
    renal_core::logging::init_with_level("warn");

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let comma = cli.decimal_comma;

    match cli.command {
        Commands::Effluent(args) => cmd_effluent(&args, comma),
        Commands::Bicarbonate { target } => cmd_bicarbonate(&target, &config, comma),
        Commands::Sodium { command } => cmd_sodium(&command, &config, comma),
        Commands::Anticoag {
            systemic,
            citrate_contraindicated,
            bleeding_risk,
        } => cmd_anticoag(&systemic, &citrate_contraindicated, &bleeding_risk),
        Commands::Prescribe { command } => cmd_prescribe(&command, &config, comma),
        Commands::Titrate { command } => cmd_titrate(&command, &config, comma),
        Commands::Sled(args) => cmd_sled(&args, comma),
        Commands::Hd(args) => cmd_hd(&args, comma),
        Commands::Eval { file } => cmd_eval(&file, &config),
    }
}

// ============================================================================
// Subcommand handlers
// ============================================================================

fn cmd_effluent(args: &EffluentArgs, comma: bool) -> Result<()> {
    let inputs = EffluentInputs {
        pre_blood_pump_ml_h: parse_optional(&args.pre_blood_pump, "pre-blood-pump")?,
        pre_filter_ml_h: parse_optional(&args.pre_filter, "pre-filter")?,
        dialysate_ml_h: parse_optional(&args.dialysate, "dialysate")?,
        post_filter_ml_h: parse_optional(&args.post_filter, "post-filter")?,
        ultrafiltration_ml_h: parse_optional(&args.uf, "uf")?,
        blood_flow_ml_min: parse_optional(&args.blood_flow, "blood-flow")?,
        hematocrit_pct: parse_optional(&args.hematocrit, "hematocrit")?,
        weight_kg: parse_optional(&args.weight, "weight")?,
    };

    let result = compute_effluent(&inputs);

    println!("Effluent");
    println!(
        "  Total effluent:      {} mL/h",
        fmt_value(result.total_effluent_ml_h, 0, comma)
    );
    println!(
        "  Dose:                {} mL/kg/h",
        fmt_opt(result.dose_ml_kg_h, 1, comma)
    );
    println!(
        "  Filtration fraction: {} %",
        fmt_opt(result.filtration_fraction_pct, 1, comma)
    );
    print_advisories(&result.advisories);
    Ok(())
}

fn cmd_bicarbonate(target: &Option<String>, config: &Config, comma: bool) -> Result<()> {
    let inputs = BicarbonateInputs {
        target_bicarbonate_mmol_l: parse_optional(target, "target")?,
    };
    let result = compute_bath_volumes(&inputs, &config.solutions);

    println!("Bicarbonate 8.4% to add per bag");
    println!(
        "  Prismasol: {}",
        fmt_signed_ml(result.prismasol_volume_ml, comma)
    );
    println!(
        "  Biphozyl:  {}",
        fmt_signed_ml(result.biphozyl_volume_ml, comma)
    );
    Ok(())
}

fn cmd_sodium(command: &SodiumCommands, config: &Config, comma: bool) -> Result<()> {
    match command {
        SodiumCommands::Hyper { target, effluent } => {
            let inputs = HypernatremiaInputs {
                target_sodium_meq_l: parse_optional(target, "target")?,
                effluent_rate_ml_h: parse_optional(effluent, "effluent")?,
            };
            let result = correct_hypernatremia(&inputs, &config.solutions);

            println!("Hypernatremia");
            println!(
                "  NaCl 20% per bag:    {}",
                fmt_opt_unit(result.nacl20_bag_volume_ml, 0, "mL", comma)
            );
            println!(
                "  3% saline infusion:  {}",
                fmt_opt_unit(result.saline3_infusion_ml_h, 0, "mL/h", comma)
            );
        }
        SodiumCommands::Hypo { target, effluent } => {
            let inputs = HyponatremiaInputs {
                target_sodium_meq_l: parse_optional(target, "target")?,
                effluent_rate_ml_h: parse_optional(effluent, "effluent")?,
            };
            let result = correct_hyponatremia(&inputs, &config.solutions);

            println!("Hyponatremia");
            println!(
                "  Water to add per bag:  {}",
                fmt_opt_unit(result.water_to_add_ml, 0, "mL", comma)
            );
            println!(
                "  Water replacement:     {}",
                fmt_opt_unit(result.water_replacement_ml, 0, "mL", comma)
            );
            println!(
                "  Dextrose 5% infusion:  {}",
                fmt_opt_unit(result.dextrose_infusion_ml_h, 0, "mL/h", comma)
            );
        }
    }
    Ok(())
}

fn cmd_anticoag(
    systemic: &Option<String>,
    citrate_contraindicated: &Option<String>,
    bleeding_risk: &Option<String>,
) -> Result<()> {
    let inputs = AnticoagInputs {
        needs_systemic_anticoagulation: parse_tristate(systemic, "systemic")?,
        citrate_contraindicated: parse_tristate(citrate_contraindicated, "citrate-contraindicated")?,
        high_bleeding_risk: parse_tristate(bleeding_risk, "bleeding-risk")?,
    };
    let decision = decide(&inputs);

    println!("Strategy: {}", strategy_label(decision.strategy));
    println!("  {}", decision.rationale);
    if !decision.monitoring_plan.is_empty() {
        println!("Monitoring plan:");
        for item in decision.monitoring_plan {
            println!("  - {}", item);
        }
    }
    if let Some(panel) = decision.panel {
        println!("Prescription panel: {}", panel_label(panel));
    }
    Ok(())
}

fn cmd_prescribe(command: &PrescribeCommands, config: &Config, comma: bool) -> Result<()> {
    match command {
        PrescribeCommands::Citrate { weight } => {
            let weight = parse_decimal(weight, "weight")?;
            match citrate_prescription(weight) {
                CitrateLookup::Matched(row) => {
                    println!("Citrate prescription ({} kg row)", row.weight_kg);
                    println!(
                        "  Blood flow:       {} mL/min",
                        fmt_value(row.blood_flow_ml_min, 0, comma)
                    );
                    println!(
                        "  Dialysate:        {} mL/h",
                        fmt_value(row.dialysate_ml_h, 0, comma)
                    );
                    println!(
                        "  Post-filter repl: {} mL/h",
                        fmt_value(row.post_filter_ml_h, 0, comma)
                    );
                    println!(
                        "  Effluent dose:    {} mL/kg/h",
                        fmt_value(row.effluent_dose_ml_kg_h, 0, comma)
                    );
                }
                CitrateLookup::OutOfRange => {
                    println!(
                        "Weight out of table range (< {} kg): no citrate prescription",
                        prescription::CITRATE_TABLE_MIN_WEIGHT_KG
                    );
                }
            }
        }
        PrescribeCommands::Heparin { weight } => {
            let weight = parse_decimal(weight, "weight")?;
            match heparin_prescription(weight, &config.heparin, &config.dosing) {
                Some(rx) => {
                    println!("Heparin prescription");
                    if let Some(bolus) = rx.bolus_ui {
                        println!(
                            "  Bolus:       {}-{} UI",
                            fmt_value(bolus.min, 0, comma),
                            fmt_value(bolus.max, 0, comma)
                        );
                    }
                    if let Some(rate) = rx.continuous_ui_h {
                        println!("  Continuous:  {} UI/h", fmt_value(rate, 0, comma));
                    }
                    print_flow_targets(&rx, comma);
                }
                None => println!("Weight must be positive"),
            }
        }
        PrescribeCommands::NoAnticoagulation { weight } => {
            let weight = parse_decimal(weight, "weight")?;
            match no_anticoagulation_prescription(weight, &config.dosing) {
                Some(rx) => {
                    println!("Prescription without anticoagulation");
                    print_flow_targets(&rx, comma);
                }
                None => println!("Weight must be positive"),
            }
        }
    }
    Ok(())
}

fn cmd_titrate(command: &TitrateCommands, config: &Config, comma: bool) -> Result<()> {
    match command {
        TitrateCommands::Citrate {
            post_filter_calcium,
        } => {
            let ica = parse_optional(post_filter_calcium, "post-filter-calcium")?;
            match citrate_dose_adjustment(ica) {
                Some(titration) => println!("{}", titration.summary),
                None => println!("Provide the post-filter ionized calcium"),
            }
        }
        TitrateCommands::Calcium {
            systemic_calcium,
            current_rate,
        } => {
            let ica = parse_optional(systemic_calcium, "systemic-calcium")?;
            let rate = parse_optional(current_rate, "current-rate")?;
            match calcium_infusion_adjustment(ica, rate) {
                Some(titration) => {
                    println!("{}", titration.summary);
                    if let Some(new_rate) = titration.new_rate_ml_h {
                        println!("  New rate: {} mL/h", fmt_value(new_rate, 1, comma));
                    }
                }
                None => println!("Provide the systemic ionized calcium"),
            }
        }
        TitrateCommands::AcidBase {
            total_calcium,
            ionized_calcium,
            ph,
            bicarbonate,
        } => {
            let inputs = AcidBaseInputs {
                total_calcium_mg_dl: parse_optional(total_calcium, "total-calcium")?,
                ionized_calcium_mmol_l: parse_optional(ionized_calcium, "ionized-calcium")?,
                ph: parse_optional(ph, "ph")?,
                bicarbonate_mmol_l: parse_optional(bicarbonate, "bicarbonate")?,
            };
            let assessment = assess_acid_base(&inputs);
            if let AcidBaseAssessment::CitrateAccumulation { ratio } = &assessment {
                println!(
                    "Total/ionized calcium ratio: {}",
                    fmt_value(*ratio, 2, comma)
                );
            }
            println!("{}", assessment.guidance());
        }
        TitrateCommands::Heparin { apttr, bleeding } => {
            let ratio = parse_optional(apttr, "apttr")?;
            let titration = heparin_titration(ratio, *bleeding, &config.heparin);
            println!("{}", titration.advisory);
        }
    }
    Ok(())
}

fn cmd_sled(args: &SledArgs, comma: bool) -> Result<()> {
    let inputs = SledInputs {
        blood_flow_ml_min: parse_optional(&args.blood_flow, "blood-flow")?,
        duration_h: parse_optional(&args.duration, "duration")?,
        weight_kg: parse_optional(&args.weight, "weight")?,
        total_uf_ml: parse_optional(&args.total_uf, "total-uf")?,
        bath_sodium_meq_l: parse_optional(&args.bath_sodium, "bath-sodium")?,
        patient_sodium_meq_l: parse_optional(&args.patient_sodium, "patient-sodium")?,
        bath_bicarbonate_mmol_l: parse_optional(&args.bath_bicarbonate, "bath-bicarbonate")?,
        patient_bicarbonate_mmol_l: parse_optional(
            &args.patient_bicarbonate,
            "patient-bicarbonate",
        )?,
        patient_potassium_mmol_l: parse_optional(&args.patient_potassium, "patient-potassium")?,
    };
    let result = compute_sled(&inputs);

    println!("SLED session");
    println!(
        "  Dialysate flow:   {}",
        fmt_opt_unit(result.qd_ml_min, 0, "mL/min", comma)
    );
    println!("  Kt/V:             {}", fmt_opt(result.ktv, 2, comma));
    println!(
        "  Urea removal:     {}",
        fmt_opt_unit(result.urea_removal_pct, 1, "%", comma)
    );
    println!(
        "  UF rate:          {}",
        fmt_opt_unit(result.uf_ml_h, 0, "mL/h", comma)
    );
    println!(
        "  UF rate/kg:       {}",
        fmt_opt_unit(result.uf_ml_kg_h, 1, "mL/kg/h", comma)
    );
    println!(
        "  Sodium gradient:  {}",
        fmt_opt_unit(result.sodium_gradient_meq_l, 0, "mEq/L", comma)
    );
    println!(
        "  Bicarbonate load: {}",
        fmt_opt_unit(result.bicarbonate_load_mmol, 0, "mmol", comma)
    );
    print_advisories(&result.advisories);
    Ok(())
}

fn cmd_hd(args: &HdArgs, comma: bool) -> Result<()> {
    let inputs = HemodialysisInputs {
        blood_flow_ml_min: parse_optional(&args.blood_flow, "blood-flow")?,
        dialysate_flow_ml_min: parse_optional(&args.dialysate_flow, "dialysate-flow")?,
        duration_h: parse_optional(&args.duration, "duration")?,
        weight_kg: parse_optional(&args.weight, "weight")?,
        total_uf_ml: parse_optional(&args.total_uf, "total-uf")?,
    };
    let result = compute_hemodialysis(&inputs);

    println!("Hemodialysis session");
    let qd_note = if result.qd_estimated { " (estimated)" } else { "" };
    println!(
        "  Dialysate flow:   {}{}",
        fmt_opt_unit(result.qd_ml_min, 0, "mL/min", comma),
        qd_note
    );
    println!("  Kt/V:             {}", fmt_opt(result.ktv, 2, comma));
    println!(
        "  Urea removal:     {}",
        fmt_opt_unit(result.urea_removal_pct, 1, "%", comma)
    );
    println!(
        "  UF rate:          {}",
        fmt_opt_unit(result.uf_ml_h, 0, "mL/h", comma)
    );
    println!(
        "  UF rate/kg:       {}",
        fmt_opt_unit(result.uf_ml_kg_h, 1, "mL/kg/h", comma)
    );
    print_advisories(&result.advisories);
    Ok(())
}

fn cmd_eval(file: &str, config: &Config) -> Result<()> {
    let contents = if file == "-" {
        use std::io::Read;
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(file)?
    };

    let request: EvalRequest = serde_json::from_str(&contents)?;
    let rendered = match request {
        EvalRequest::Effluent(inputs) => to_json(&compute_effluent(&inputs))?,
        EvalRequest::Bicarbonate(inputs) => {
            to_json(&compute_bath_volumes(&inputs, &config.solutions))?
        }
        EvalRequest::Hypernatremia(inputs) => {
            to_json(&correct_hypernatremia(&inputs, &config.solutions))?
        }
        EvalRequest::Hyponatremia(inputs) => {
            to_json(&correct_hyponatremia(&inputs, &config.solutions))?
        }
        EvalRequest::Anticoagulation(inputs) => to_json(&decide(&inputs))?,
        EvalRequest::AcidBase(inputs) => to_json(&assess_acid_base(&inputs))?,
        EvalRequest::Sled(inputs) => to_json(&compute_sled(&inputs))?,
        EvalRequest::Hemodialysis(inputs) => to_json(&compute_hemodialysis(&inputs))?,
    };
    println!("{}", rendered);
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

// ============================================================================
// Parsing and rendering helpers
// ============================================================================

/// Parse a decimal accepting both comma and point separators
fn parse_decimal(raw: &str, name: &str) -> Result<f64> {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| Error::Input(format!("{}: '{}' is not a number", name, raw)))
}

fn parse_optional(raw: &Option<String>, name: &str) -> Result<Option<f64>> {
    raw.as_deref()
        .map(|r| parse_decimal(r, name))
        .transpose()
}

fn parse_tristate(raw: &Option<String>, name: &str) -> Result<TriState> {
    match raw.as_deref().map(|r| r.trim().to_lowercase()) {
        None => Ok(TriState::Unset),
        Some(v) if v == "yes" || v == "y" => Ok(TriState::Yes),
        Some(v) if v == "no" || v == "n" => Ok(TriState::No),
        Some(v) => Err(Error::Input(format!(
            "{}: expected yes or no, got '{}'",
            name, v
        ))),
    }
}

fn fmt_value(value: f64, decimals: usize, comma: bool) -> String {
    let rendered = format!("{:.*}", decimals, value);
    if comma {
        rendered.replace('.', ",")
    } else {
        rendered
    }
}

/// Undefined values render as a dash, the chart convention for "no result"
fn fmt_opt(value: Option<f64>, decimals: usize, comma: bool) -> String {
    match value {
        Some(v) => fmt_value(v, decimals, comma),
        None => "–".to_string(),
    }
}

fn fmt_opt_unit(value: Option<f64>, decimals: usize, unit: &str, comma: bool) -> String {
    match value {
        Some(v) => format!("{} {}", fmt_value(v, decimals, comma), unit),
        None => "–".to_string(),
    }
}

/// Signed quantities render through their applicability tag, never the sign
fn fmt_signed_ml(quantity: Option<SignedQuantity>, comma: bool) -> String {
    match quantity {
        Some(q) if q.is_applicable() => format!("{} mL", fmt_value(q.value, 0, comma)),
        Some(_) => "N/A".to_string(),
        None => "–".to_string(),
    }
}

fn print_flow_targets(rx: &LinearPrescription, comma: bool) {
    println!(
        "  Effluent target: {}-{} mL/h",
        fmt_value(rx.effluent_target_ml_h.min, 0, comma),
        fmt_value(rx.effluent_target_ml_h.max, 0, comma)
    );
    println!(
        "  Dialysate:       {}-{} mL/h",
        fmt_value(rx.dialysate_ml_h.min, 0, comma),
        fmt_value(rx.dialysate_ml_h.max, 0, comma)
    );
    println!(
        "  Replacement:     {}-{} mL/h",
        fmt_value(rx.replacement_ml_h.min, 0, comma),
        fmt_value(rx.replacement_ml_h.max, 0, comma)
    );
}

fn print_advisories(advisories: &[Advisory]) {
    for advisory in advisories {
        match advisory.severity {
            Severity::Warning => println!("  ⚠ {}", advisory.text),
            Severity::Info => println!("  ℹ {}", advisory.text),
        }
    }
}

fn strategy_label(strategy: Strategy) -> &'static str {
    match strategy {
        Strategy::Citrate => "Regional citrate",
        Strategy::Heparin => "Systemic heparin",
        Strategy::NoAnticoagulation => "No anticoagulation",
        Strategy::Incomplete => "Incomplete",
    }
}

fn panel_label(panel: Panel) -> &'static str {
    match panel {
        Panel::Citrate => "citrate",
        Panel::Heparin => "heparin",
        Panel::NoAnticoagulation => "no-anticoagulation",
    }
}
