//! The `gi` command: what it runs and the collaborators it runs with.

use crate::args::Args;
use crate::error::Error;
use crate::gitignore_api::TemplateService;
use crate::ignore_file::{persist, WriteMode};
use crate::prompt::Prompter;
use crate::template::Filter;
use log::{debug, info};
use std::io::Write;
use std::path::PathBuf;

/// Collaborators a handler works with.
pub(crate) struct Context<'a> {
    pub(crate) service: &'a dyn TemplateService,
    pub(crate) prompter: &'a mut dyn Prompter,
    /// The gitignore file to create or update.
    pub(crate) target: PathBuf,
    /// Where `--list` and `--print` output goes.
    pub(crate) out: &'a mut dyn Write,
}

/// What a successful run did, for the final status line.
#[derive(Debug, PartialEq)]
pub(crate) enum Outcome {
    Listed { filter: String, count: usize },
    Printed { subjects: Vec<String> },
    Written {
        mode: WriteMode,
        subjects: Vec<String>,
    },
}

impl Outcome {
    pub(crate) fn message(&self) -> Option<String> {
        match self {
            Outcome::Written { mode, subjects } => {
                Some(format!("{} ({})", mode.message(), subjects.join(", ")))
            }
            Outcome::Printed { subjects } => {
                Some(format!("Printed templates for {}.", subjects.join(", ")))
            }
            Outcome::Listed { filter, count: 0 } if !filter.is_empty() => {
                Some(format!(r#"No templates match "{}""#, filter))
            }
            Outcome::Listed { .. } => None,
        }
    }
}

type Handler = fn(&Args, &mut Context) -> Result<Outcome, Error>;

/// A command name, its parsed flags and the handler chosen for them.
pub(crate) struct Command {
    pub(crate) name: &'static str,
    pub(crate) args: Args,
    handler: Handler,
}

impl Command {
    pub(crate) fn new(args: Args) -> Self {
        let handler: Handler = if args.list.is_some() { list } else { generate };
        Self {
            name: env!("CARGO_PKG_NAME"),
            args,
            handler,
        }
    }
    pub(crate) fn run(&self, context: &mut Context) -> Result<Outcome, Error> {
        debug!("running {} with {:?}", self.name, self.args);
        (self.handler)(&self.args, context)
    }
}

fn list(args: &Args, context: &mut Context) -> Result<Outcome, Error> {
    let filter_text = args.list.as_deref().unwrap_or_default();
    let filter = Filter::new(filter_text)?;
    let names: Vec<String> = context
        .service
        .list()?
        .into_iter()
        .filter(|name| filter.is_match(name))
        .collect();
    for name in &names {
        writeln!(context.out, "{}", name).map_err(|source| Error::Write {
            path: PathBuf::from("<stdout>"),
            source,
        })?;
    }
    Ok(Outcome::Listed {
        filter: filter_text.to_string(),
        count: names.len(),
    })
}

fn generate(args: &Args, context: &mut Context) -> Result<Outcome, Error> {
    let subjects = resolve_subjects(&args.subjects, context)?;
    let content = fetch_template(context.service, &subjects)?;
    if args.print {
        context
            .out
            .write_all(&content)
            .map_err(|source| Error::Write {
                path: PathBuf::from("<stdout>"),
                source,
            })?;
        return Ok(Outcome::Printed { subjects });
    }
    let preset = match (args.append, args.overwrite) {
        (true, _) => Some(WriteMode::Append),
        (_, true) => Some(WriteMode::Overwrite),
        _ => None,
    };
    let mode = resolve_write_mode(context, preset)?;
    persist(&context.target, mode, &content)?;
    Ok(Outcome::Written { mode, subjects })
}

/// Subjects as given, or the user's picks from the catalog when none were given.
pub(crate) fn resolve_subjects(
    args: &[String],
    context: &mut Context,
) -> Result<Vec<String>, Error> {
    if !args.is_empty() {
        return Ok(args.to_vec());
    }
    let catalog = context.service.list()?;
    let chosen = context
        .prompter
        .select_many("Pick .gitignore templates", &catalog)?;
    if chosen.is_empty() {
        return Err(Error::NoSelection);
    }
    Ok(chosen)
}

pub(crate) fn fetch_template(
    service: &dyn TemplateService,
    subjects: &[String],
) -> Result<Vec<u8>, Error> {
    let content = service.fetch(subjects)?;
    info!("fetched {} bytes for {}", content.len(), subjects.join(","));
    Ok(content)
}

/// `Create` for a new file; otherwise `preset`, or the user's answer.
pub(crate) fn resolve_write_mode(
    context: &mut Context,
    preset: Option<WriteMode>,
) -> Result<WriteMode, Error> {
    if !context.target.exists() {
        return Ok(WriteMode::Create);
    }
    if let Some(mode) = preset {
        return Ok(mode);
    }
    let choices: Vec<String> = WriteMode::CHOICES.iter().map(|c| c.to_string()).collect();
    let title = format!("{} already exists", context.target.display());
    let choice = context.prompter.select_one(&title, &choices)?;
    let mode = choice
        .as_deref()
        .and_then(WriteMode::from_choice)
        .ok_or(Error::Cancelled)?;
    debug!("chose {:?}", mode);
    Ok(mode)
}
