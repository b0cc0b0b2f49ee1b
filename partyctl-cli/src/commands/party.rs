//! One-shot party commands: list, rename, moves, delete
//!
//! ```bash
//! partyctl list --json | jq '.[] | {id, name}'
//! partyctl moves 1 Tackle "Vine Whip" "Razor Leaf"
//! ```

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, ValueEnum};
use partyctl_core::{MemberId, PartyMember, PartyView, MAX_SELECTED_MOVES};

use super::Session;

// ============================================================================
// Args
// ============================================================================

#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (for piping to jq)
    Json,
    /// Quiet mode - IDs only
    Quiet,
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(long, short, value_enum, default_value = "human")]
    pub output: OutputFormat,

    /// Shorthand for --output json
    #[arg(long, conflicts_with = "output")]
    pub json: bool,

    /// Shorthand for --output quiet
    #[arg(long, short, conflicts_with = "output")]
    pub quiet: bool,
}

#[derive(Parser, Debug)]
pub struct RenameArgs {
    /// Party member ID
    pub id: MemberId,

    /// New display name
    pub name: String,
}

#[derive(Parser, Debug)]
pub struct MovesArgs {
    /// Party member ID
    pub id: MemberId,

    /// Moves to select (1 to 4, each must be learnable)
    pub moves: Vec<String>,
}

#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// Party member ID
    pub id: MemberId,
}

fn get_output_format(output: OutputFormat, json_flag: bool, quiet_flag: bool) -> OutputFormat {
    if json_flag {
        OutputFormat::Json
    } else if quiet_flag {
        OutputFormat::Quiet
    } else {
        output
    }
}

async fn loaded_view(session: &Session) -> Result<PartyView> {
    let mut view = session.view()?;
    view.load_party()
        .await
        .with_context(|| format!("Failed to load party from {}", session.endpoint))?;
    Ok(view)
}

fn require<'a>(view: &'a PartyView, id: &MemberId) -> Result<&'a PartyMember> {
    view.member(id)
        .ok_or_else(|| anyhow!("No party member with id {}", id))
}

// ============================================================================
// List
// ============================================================================

pub async fn run_list(session: &Session, args: ListArgs) -> Result<()> {
    let view = loaded_view(session).await?;
    let format = get_output_format(args.output, args.json, args.quiet);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(view.members())?);
        }
        OutputFormat::Quiet => {
            for member in view.members() {
                println!("{}", member.id);
            }
        }
        OutputFormat::Human => print!("{}", render_party(view.members())),
    }

    Ok(())
}

/// Tree rendering of the party for terminal output
pub fn render_party(members: &[PartyMember]) -> String {
    let mut out = String::new();
    out.push_str(&format!("┌─ party ({} members)\n│\n", members.len()));

    if members.is_empty() {
        out.push_str("└─ No Pokémon in party\n");
        return out;
    }

    for (i, member) in members.iter().enumerate() {
        let is_last = i == members.len() - 1;
        let prefix = if is_last { "└─" } else { "├─" };
        let cont_prefix = if is_last { "   " } else { "│  " };

        out.push_str(&format!("{} {}. {} [id {}]\n", prefix, i + 1, member.name, member.id));
        out.push_str(&format!(
            "{}Moves: {}\n",
            cont_prefix,
            member.displayed_moves().join(", ")
        ));
        if !member.official_artwork.is_empty() {
            out.push_str(&format!("{}Art:   {}\n", cont_prefix, member.official_artwork));
        }
        if !is_last {
            out.push_str("│\n");
        }
    }

    out
}

// ============================================================================
// Rename / Moves / Delete
// ============================================================================

pub async fn run_rename(session: &Session, args: RenameArgs) -> Result<()> {
    let mut view = loaded_view(session).await?;
    let old_name = rename(&mut view, &args.id, &args.name).await?;

    println!("✓ Renamed {} to {} (id: {})", old_name, args.name, args.id);
    Ok(())
}

/// Rename a member of a loaded view. Returns the previous name.
async fn rename(view: &mut PartyView, id: &MemberId, name: &str) -> Result<String> {
    let old_name = require(view, id)?.name.clone();

    view.rename_member(id, name)
        .await
        .context("Failed to rename party member")?;

    Ok(old_name)
}

pub async fn run_moves(session: &Session, args: MovesArgs) -> Result<()> {
    let mut view = loaded_view(session).await?;
    let selected = replace_moves(&mut view, &args.id, &args.moves).await?;

    let name = require(&view, &args.id)?.name.clone();
    println!("✓ {} now knows: {}", name, selected.join(", "));
    Ok(())
}

/// Replace the selected moves of a member with `moves`, in argument order.
///
/// Nothing is sent when there are more than four moves or one of them is
/// not learnable. Returns the selection that was stored.
async fn replace_moves(
    view: &mut PartyView,
    id: &MemberId,
    moves: &[String],
) -> Result<Vec<String>> {
    if moves.len() > MAX_SELECTED_MOVES {
        bail!(
            "At most {} moves can be selected, got {}",
            MAX_SELECTED_MOVES,
            moves.len()
        );
    }

    let member = require(view, id)?.clone();

    if let Some(unknown) = moves.iter().find(|m| !member.can_learn(m)) {
        bail!(
            "{} cannot learn '{}'. Learnable moves: {}",
            member.name,
            unknown,
            member.learnable_moves.join(", ")
        );
    }

    // Start from the displayed moves like the TUI does, then replace them
    view.begin_move_edit(id)?;
    for current in member.displayed_moves() {
        view.select_move(id, current, false);
    }
    for m in moves {
        view.select_move(id, m, true);
    }

    let selected = view
        .pending_selection(id)
        .map(|sel| sel.as_slice().to_vec())
        .unwrap_or_default();

    view.commit_move_selection(id)
        .await
        .context("Failed to update moves")?;

    Ok(selected)
}

pub async fn run_delete(session: &Session, args: DeleteArgs) -> Result<()> {
    let mut view = loaded_view(session).await?;
    let name = release(&mut view, &args.id).await?;

    println!("✓ Released {} (id: {})", name, args.id);
    Ok(())
}

/// Delete a member of a loaded view. Returns its name.
async fn release(view: &mut PartyView, id: &MemberId) -> Result<String> {
    let name = require(view, id)?.name.clone();

    view.delete_member(id)
        .await
        .context("Failed to delete party member")?;

    Ok(name)
}
