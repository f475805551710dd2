//! Main workflow orchestration logic
//!
//! Turns command-line flags and interactive answers into a [WorkflowConfig],
//! then wires the real git facade, release publisher and spinner into a
//! [Workflow] run. Keeping this out of `main.rs` lets tests drive the prompt
//! flow with scripted input.

use std::io::{BufRead, Write};

use anyhow::{anyhow, bail, Context, Result};
use tracing::debug;

use super::Args;
use crate::boundary::BoundaryWarning;
use crate::config::{load_config, BehaviorConfig};
use crate::domain::{BranchContext, BumpKind};
use crate::env::load_env_values;
use crate::git::{GitCli, Repository};
use crate::logging::init_logging;
use crate::progress::SpinnerProgress;
use crate::release::{HttpReleasePublisher, RepoType};
use crate::ui::{self, Prompter};
use crate::version;
use crate::workflow::{StepTimings, Workflow, WorkflowConfig};

/// Run choices gathered from flags and prompts, with the warnings raised on the way
#[derive(Debug, Clone, PartialEq)]
pub struct CollectedConfig {
    pub config: WorkflowConfig,
    pub warnings: Vec<BoundaryWarning>,
}

/// Builds the run configuration.
///
/// Any choice given on the command line is used as is; the rest is asked
/// through `prompter`, in the order remote, source, destination, push,
/// branch removal, bump kind, release. With `--no-input` nothing is asked:
/// missing remote or branches are errors and missing yes/no choices are off.
pub fn collect_workflow_config<Rp, R, W>(
    args: &Args,
    behavior: &BehaviorConfig,
    repo: &Rp,
    prompter: &mut Prompter<R, W>,
) -> Result<CollectedConfig>
where
    Rp: Repository,
    R: BufRead,
    W: Write,
{
    let interactive = !args.no_input;
    let mut warnings = Vec::new();

    let remote = match &args.remote {
        Some(remote) => remote.clone(),
        None if interactive => {
            let remotes = repo.list_remotes()?;
            if remotes.is_empty() {
                bail!("No remotes configured in this repository");
            }
            let index = prompter.select("Select remote", &remotes)?;
            remotes[index].clone()
        }
        None => bail!("No remote given; pass --remote"),
    };

    let source_branch = match &args.source {
        Some(source) => source.clone(),
        None if interactive => {
            let branches = repo.list_branches()?;
            if branches.is_empty() {
                bail!("No local branches found");
            }
            let index = prompter.select("Select source branch", &branches)?;
            branches[index].clone()
        }
        None => bail!("No source branch given; pass --source"),
    };

    let destination_branch = match &args.destination {
        Some(destination) => destination.clone(),
        None if interactive => {
            let branches: Vec<String> = repo
                .list_branches()?
                .into_iter()
                .filter(|branch| *branch != source_branch)
                .collect();
            if branches.is_empty() {
                bail!("No branch left to merge '{}' into", source_branch);
            }
            let index = prompter.select("Select destination branch", &branches)?;
            branches[index].clone()
        }
        None => bail!("No destination branch given; pass --destination"),
    };

    let push = ask_flag(
        args.push,
        interactive,
        prompter,
        &format!("Push changes to {}?", remote),
    )?;

    let source = BranchContext::new(
        source_branch.as_str(),
        &behavior.protected_branches,
        &behavior.prerelease_branches,
    );
    let remove_branch = if source.may_be_removed() {
        ask_flag(
            args.remove_branch,
            interactive,
            prompter,
            &format!("Remove branch '{}' after merging?", source.name),
        )?
    } else {
        if args.remove_branch == Some(true) {
            warnings.push(BoundaryWarning::ProtectedSourceBranch {
                branch: source.name.clone(),
            });
        }
        false
    };

    let destination = BranchContext::new(
        destination_branch.as_str(),
        &behavior.protected_branches,
        &behavior.prerelease_branches,
    );
    let bump = match &args.bump {
        Some(kind) => BumpKind::parse_optional(kind)?,
        None if interactive && push => ask_bump(repo, &destination, prompter)?,
        None => None,
    };

    let create_release = match bump {
        Some(_) => ask_flag(args.release, interactive, prompter, "Create a release?")?,
        None => args.release.unwrap_or(false),
    };

    let mut config = WorkflowConfig::new(remote, source_branch, destination_branch);
    config.push = push;
    config.remove_branch = remove_branch;
    config.bump = bump;
    config.create_release = create_release;

    if config.wants_release() {
        config.repo_type = Some(resolve_repo_type(args, repo, &config.remote, prompter)?);
        config.release_title = match &args.title {
            Some(title) => title.clone(),
            None if interactive => {
                prompter.input("Release title (leave empty for 'Release <tag>')")?
            }
            None => String::new(),
        };
        config.release_notes = match &args.notes {
            Some(notes) => notes.clone(),
            None if interactive => prompter.multiline("Release notes")?,
            None => String::new(),
        };
    }

    debug!(?config, "collected workflow configuration");
    Ok(CollectedConfig { config, warnings })
}

fn ask_flag<R: BufRead, W: Write>(
    given: Option<bool>,
    interactive: bool,
    prompter: &mut Prompter<R, W>,
    question: &str,
) -> Result<bool> {
    match given {
        Some(value) => Ok(value),
        None if interactive => prompter.confirm(question, false),
        None => Ok(false),
    }
}

/// Ask for the bump kind, previewing the tag each choice would produce
fn ask_bump<Rp, R, W>(
    repo: &Rp,
    destination: &BranchContext,
    prompter: &mut Prompter<R, W>,
) -> Result<Option<BumpKind>>
where
    Rp: Repository,
    R: BufRead,
    W: Write,
{
    let latest = match repo.latest_tag() {
        Ok(tag) => tag,
        Err(_) => {
            let first = version::next_tag(None, Some(BumpKind::Major));
            let create = prompter.confirm(
                &format!("No tags yet. Create the first version tag {}?", first),
                true,
            )?;
            return Ok(create.then_some(BumpKind::Major));
        }
    };

    let kinds: &[BumpKind] = if destination.is_prerelease {
        &BumpKind::PRE
    } else {
        &BumpKind::STABLE
    };

    let mut options: Vec<String> = kinds
        .iter()
        .map(|kind| {
            format!(
                "{} → {} ({})",
                kind,
                version::next_tag(Some(&latest), Some(*kind)),
                kind.description()
            )
        })
        .collect();
    options.push("none (do not tag)".to_string());

    let index = prompter.select(&format!("Select version bump (current {})", latest), &options)?;
    Ok(kinds.get(index).copied())
}

/// Release platform from `--repo-type`, else from the remote URL, else asked
fn resolve_repo_type<Rp, R, W>(
    args: &Args,
    repo: &Rp,
    remote: &str,
    prompter: &mut Prompter<R, W>,
) -> Result<RepoType>
where
    Rp: Repository,
    R: BufRead,
    W: Write,
{
    if let Some(kind) = &args.repo_type {
        return Ok(kind.parse()?);
    }

    if let Ok(url) = repo.remote_url(remote) {
        if let Some(detected) = RepoType::ALL
            .into_iter()
            .find(|kind| url.contains(kind.host()))
        {
            debug!(%url, repo_type = %detected, "detected release platform");
            return Ok(detected);
        }
    }

    if args.no_input {
        bail!("Cannot tell the release platform from remote '{}'; pass --repo-type", remote);
    }

    let options: Vec<String> = RepoType::ALL
        .iter()
        .map(|kind| kind.display_name().to_string())
        .collect();
    let index = prompter.select("Select repository type", &options)?;
    Ok(RepoType::ALL[index])
}

/// Fail before touching the repository when a release is wanted but no token is set
pub fn check_release_token(config: &WorkflowConfig, publisher: &HttpReleasePublisher) -> Result<()> {
    if let (true, Some(repo_type)) = (config.wants_release(), config.repo_type) {
        publisher.token(repo_type)?;
    }
    Ok(())
}

fn display_summary(config: &WorkflowConfig) {
    ui::display_choice("Remote", &config.remote);
    ui::display_choice(
        "Merge",
        format!("{} → {}", config.source_branch, config.destination_branch),
    );
    ui::display_choice("Push", config.push);
    ui::display_choice("Remove source branch", config.remove_branch);
    ui::display_choice(
        "Bump",
        config.bump.map(|b| b.to_string()).unwrap_or_else(|| "none".to_string()),
    );
    if let (true, Some(repo_type)) = (config.wants_release(), config.repo_type) {
        ui::display_choice("Release", repo_type.display_name());
    }
}

/// Full program run: configuration, prompts, then the workflow
pub fn run(args: &Args) -> Result<()> {
    let app_config = load_config(args.config.as_deref()).context("Error loading config")?;
    init_logging(args.verbose, &app_config.logging.level);

    let repo = GitCli::system();

    if args.list {
        let branches = repo.list_branches()?;
        let remotes = repo.list_remotes()?;
        ui::display_repository_overview(&branches, &remotes);
        return Ok(());
    }

    let env = load_env_values(args.env_file.as_deref())?;

    ui::display_title("Version Manager");
    let mut prompter = Prompter::stdio();
    let collected = collect_workflow_config(args, &app_config.behavior, &repo, &mut prompter)?;
    drop(prompter);

    for warning in &collected.warnings {
        ui::display_boundary_warning(warning);
    }
    let config = collected.config;
    display_summary(&config);

    let publisher = HttpReleasePublisher::new(app_config.release.clone(), env)?;
    check_release_token(&config, &publisher)?;

    let timings = if args.no_delay {
        StepTimings::none()
    } else {
        StepTimings::from(&app_config.behavior)
    };
    let progress = SpinnerProgress::new();

    let outcome = Workflow::new(&repo, &publisher, &progress)
        .with_timings(timings)
        .run(&config)
        .map_err(|err| {
            ui::display_step_error(&err);
            anyhow!(err)
        })?;

    ui::display_outcome(&outcome);
    Ok(())
}
