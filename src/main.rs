use clap::{
    crate_authors, crate_description, crate_name, crate_version, value_parser, Arg, ArgAction,
    ArgMatches, Command,
};
use flaskgen::config::{self, Features, ScaffoldConfig};
use std::path::PathBuf;

fn flag(id: &'static str, short: char, long: &'static str, help: &'static str) -> Arg {
    Arg::new(id)
        .short(short)
        .long(long)
        .help(help)
        .action(ArgAction::SetTrue)
}

fn cli() -> Command {
    Command::new(crate_name!())
        .about(crate_description!())
        .author(crate_authors!())
        .version(crate_version!())
        .arg(
            Arg::new("project_folder")
                .help("Folder to create the project in [default: the folder holding this tool]")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(flag(
            "use_blueprints",
            'b',
            "use-blueprints",
            "Create a blueprint package instead of a views module",
        ))
        .arg(flag(
            "include_configs",
            'c',
            "include-configs",
            "Create a config.py module",
        ))
        .arg(flag(
            "include_forms",
            'f',
            "include-forms",
            "Create a forms.py module",
        ))
        .arg(flag(
            "include_models",
            'm',
            "include-models",
            "Create a models.py module",
        ))
        .arg(flag(
            "overwrite",
            'w',
            "overwrite",
            "Replace an existing app_pkg directory",
        ))
        .arg(
            Arg::new("dry_run")
                .long("dry-run")
                .help("Print the project tree without writing anything")
                .action(ArgAction::SetTrue),
        )
        .arg(flag("verbose", 'v', "verbose", "Enable verbose output"))
}

fn init_logger(is_verbose: bool) {
    let default_level = if is_verbose { "debug" } else { "warn" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn build_config(args: &ArgMatches) -> miette::Result<ScaffoldConfig> {
    let root = match args.get_one::<PathBuf>("project_folder") {
        Some(folder) => folder.clone(),
        None => config::default_root()?,
    };

    let features = Features {
        use_blueprints: args.get_flag("use_blueprints"),
        include_configs: args.get_flag("include_configs"),
        include_forms: args.get_flag("include_forms"),
        include_models: args.get_flag("include_models"),
    };

    Ok(ScaffoldConfig::new(root, features, args.get_flag("overwrite")))
}

// The CLI layer should only parse inputs and forward them to library code.
fn main() -> miette::Result<()> {
    let matches = cli().get_matches();

    init_logger(matches.get_flag("verbose"));

    let config = build_config(&matches)?;

    if matches.get_flag("dry_run") {
        flaskgen::api::preview(&config)?;
    } else {
        flaskgen::api::generate(&config)?;
    }

    Ok(())
}
