use clap::Parser;
use org_directory::config::toml_config::SeedReport;
use org_directory::utils::{logger, validation::Validate};
use org_directory::{
    CliConfig, CsvExporter, DirectoryConfig, EmployeeCodec, HrService, JsonCodec,
    StructureExporter,
};

fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    // 載入 TOML 配置（日誌尚未初始化，直接輸出到 stderr）
    let config = match DirectoryConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load directory file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if args.json_logs || config.json_logs() {
        let level = if args.verbose { "debug" } else { config.log_level() };
        logger::init_json_logger(level);
    } else {
        logger::init_cli_logger(args.verbose, config.log_level());
    }

    tracing::info!("🚀 Starting org-directory for {}", config.directory.name);
    if args.verbose {
        tracing::debug!("CLI config: {:?}", args);
    }

    // 驗證配置
    if let Err(e) = args.validate().and_then(|_| config.validate()) {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let today = chrono::Local::now().date_naive();
    let (mut service, mut report) = config.seed(today);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - raises are not applied");
    } else {
        config.apply_raises(&mut service, &mut report);
    }

    display_report(&config, &report);
    println!("{}", service.display_department_structure());

    if let Err(e) = export(&args, &service) {
        tracing::error!("❌ Export failed: {}", e);
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(2);
    }

    Ok(())
}

fn export(args: &CliConfig, service: &HrService) -> org_directory::Result<()> {
    if let Some(path) = &args.export_json {
        let json = JsonCodec::pretty().encode(&service.export_records())?;
        std::fs::write(path, json)?;
        tracing::info!("📁 Employees saved to: {}", path);
    }

    if let Some(path) = &args.export_csv {
        let summaries: Vec<_> = service.department_structure().into_iter().collect();
        let csv = CsvExporter::new().export(&summaries)?;
        std::fs::write(path, csv)?;
        tracing::info!("📁 Department structure saved to: {}", path);
    }

    Ok(())
}

fn display_report(config: &DirectoryConfig, report: &SeedReport) {
    println!("📋 {}", config.directory.name);
    if let Some(description) = &config.directory.description {
        println!("  {}", description);
    }
    println!("  Departments: {}", config.departments.len());
    println!("  Employees registered: {}", report.registered);

    for rejected in &report.rejected {
        println!("  ⚠️ Rejected: {}", rejected);
    }
    for unassigned in &report.unassigned {
        println!("  ⚠️ Department not found for: {}", unassigned);
    }

    println!(
        "  Raises applied: {}, skipped: {}",
        report.raises_applied,
        report.raises_skipped.len()
    );
    println!();
}
