//! Demo binary: one subcommand per selector variant over seeded loot.

use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use stash_core::{
    Capacity, CompareSelector, InsertSelector, ItemCategory, ItemFlags, ItemHandle, ItemId,
    MultiSelector, Outcome, PickOneSelector, PickupSelector, TradeOutcome, TradePane, TradeParty,
    TradeSession, UiState,
};
use stash_tui::widgets::{render_compare_popup, render_selector, render_trade};
use stash_tui::{EventInput, TerminalSession, Theme};

/// Inventory selection demo
#[derive(Parser, Debug)]
#[command(name = "stash")]
#[command(author, version, about = "Inventory selection engine demo", long_about = None)]
struct Args {
    /// Loot generation seed
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Force the light terminal theme
    #[arg(long)]
    light: bool,

    /// Write a debug log to this file
    #[arg(long)]
    log: Option<PathBuf>,

    #[command(subcommand)]
    command: Mode,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Pick a single item
    Pick,
    /// Multi-select items to drop, with count prefixes
    Drop,
    /// Compare two items side by side
    Compare,
    /// Pick up nearby items, with wield/wear shortcuts
    Pickup,
    /// Insert items into a duffel bag
    Insert,
    /// Barter with a trader
    Trade,
}

fn init_logging(path: Option<&PathBuf>) -> io::Result<()> {
    // stdout belongs to the TUI; logs go to a file or nowhere
    let Some(path) = path else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    init_logging(args.log.as_ref())?;
    let theme = if args.light {
        Theme::light()
    } else {
        Theme::auto()
    };

    let mut uistate = UiState::load();
    let src = stash_tui::sample::loot(args.seed);

    let mut session = TerminalSession::new()?;
    let (width, height) = session.size();
    let mut input = EventInput::new();

    match args.command {
        Mode::Pick => {
            let mut picker = PickOneSelector::new("Use which item?");
            picker.selector_mut().add_character_items(&src);
            picker.selector_mut().apply_ui_state(&uistate);
            picker.selector_mut().prepare_layout(width, height);
            let picked = picker.run(&mut input, |sel| {
                draw_selector(&mut session, sel, &theme);
            });
            picker.selector().store_ui_state(&mut uistate);
            drop(session);
            match picked {
                Some(id) => println!("picked item #{}", id.0),
                None => println!("cancelled"),
            }
        }
        Mode::Drop => {
            let mut multi = MultiSelector::new("Drop what?");
            multi.selector_mut().set_collation(true);
            multi.selector_mut().add_character_items(&src);
            multi.selector_mut().apply_ui_state(&uistate);
            multi.selector_mut().prepare_layout(width, height);
            let outcome = multi.run(&mut input, |sel| {
                draw_selector(&mut session, sel, &theme);
            });
            multi.selector().store_ui_state(&mut uistate);
            drop(session);
            report_outcome(outcome);
        }
        Mode::Compare => {
            let mut cmp = CompareSelector::new("Compare what?");
            cmp.selector_mut().add_character_items(&src);
            cmp.selector_mut().add_nearby_items(&src, 1);
            cmp.selector_mut().apply_ui_state(&uistate);
            cmp.selector_mut().prepare_layout(width, height);
            let pair = cmp.run(&mut input, |cmp| {
                draw_compare(&mut session, cmp, &theme);
            });
            cmp.selector().store_ui_state(&mut uistate);
            drop(session);
            match pair {
                Some((a, b)) => println!("compared #{} with #{}", a.0, b.0),
                None => println!("nothing compared"),
            }
        }
        Mode::Pickup => {
            let mut pickup = PickupSelector::new("Pick up what?");
            pickup.selector_mut().add_nearby_items(&src, 1);
            pickup.selector_mut().apply_ui_state(&uistate);
            pickup.selector_mut().prepare_layout(width, height);
            let outcome = pickup.run(&mut input, |pickup| {
                draw_pickup(&mut session, pickup, &theme);
            });
            pickup.selector().store_ui_state(&mut uistate);
            drop(session);
            for direct in &outcome.direct {
                println!("direct: {direct:?}");
            }
            report_outcome(Outcome::Committed(outcome.picks));
        }
        Mode::Insert => {
            let mut ins = InsertSelector::new(duffel_bag());
            ins.add_character_items(&src);
            ins.add_nearby_items(&src, 1);
            ins.selector_mut().apply_ui_state(&uistate);
            ins.prepare_layout(width, height);
            let outcome = ins.run(&mut input, |sel| {
                draw_selector(&mut session, sel, &theme);
            });
            ins.selector().store_ui_state(&mut uistate);
            drop(session);
            report_outcome(outcome);
        }
        Mode::Trade => {
            let mut yours = TradePane::new(TradeParty::new("You"));
            yours.selector_mut().add_character_items(&src);
            yours.selector_mut().apply_ui_state(&uistate);
            let mut theirs = TradePane::new(
                TradeParty::new("Trader").capacity(80_000, 60_000),
            );
            let wares = stash_tui::sample::loot(args.seed.wrapping_add(1));
            theirs.selector_mut().add_character_items(&wares);
            let mut trade = TradeSession::new(yours, theirs);
            trade.prepare_layout(width, height);
            let outcome = trade.run(&mut input, |trade_ref| {
                draw_trade(&mut session, trade_ref, &theme);
            });
            trade.panes()[0].selector().store_ui_state(&mut uistate);
            drop(session);
            match outcome {
                TradeOutcome::Committed(result) => {
                    println!("trade settled at balance ${:.2}", result.balance as f64 / 100.0);
                    println!("you hand over {} item(s)", result.from_first.len());
                    println!("you receive {} item(s)", result.from_second.len());
                }
                TradeOutcome::Cancelled => println!("no deal"),
            }
        }
    }

    if let Err(e) = uistate.save() {
        info!("could not persist preferences: {e}");
    }
    Ok(())
}

fn duffel_bag() -> ItemHandle {
    ItemHandle {
        id: ItemId(9_000),
        kind: "duffel bag".to_string(),
        name: "duffel bag".to_string(),
        name_plural: None,
        category: ItemCategory::new("clothing", "CLOTHING", 4),
        count: 1,
        charges: None,
        weight_g: 900,
        volume_ml: 2_000,
        length_mm: 700,
        flags: ItemFlags::WEARABLE,
        invlet: None,
        value: 1_200,
        capacity: Some(Capacity {
            volume_ml: 25_000,
            weight_g: 20_000,
            max_length_mm: 650,
            watertight: false,
        }),
        parent: None,
    }
}

fn report_outcome(outcome: Outcome) {
    match outcome {
        Outcome::Committed(selection) => {
            for (id, count) in &selection.picks {
                println!("item #{} x{}", id.0, count);
            }
            println!("{} pick(s)", selection.picks.len());
        }
        Outcome::Cancelled => println!("cancelled"),
    }
}

fn draw_selector(session: &mut TerminalSession, sel: &mut stash_core::Selector, theme: &Theme) {
    let _ = session.terminal_mut().draw(|frame| {
        let area = frame.area();
        render_selector(frame, area, sel, theme);
    });
}

fn draw_compare(session: &mut TerminalSession, cmp: &mut CompareSelector, theme: &Theme) {
    let popup = cmp.popup();
    let _ = session.terminal_mut().draw(|frame| {
        let area = frame.area();
        render_selector(frame, area, cmp.selector_mut(), theme);
        if let Some((a, b)) = popup {
            let pool = cmp.selector().pool();
            if let (Some(left), Some(right)) = (pool.get(a), pool.get(b)) {
                render_compare_popup(frame, area, left, right, theme);
            }
        }
    });
}

fn draw_pickup(session: &mut TerminalSession, pickup: &mut PickupSelector, theme: &Theme) {
    let _ = session.terminal_mut().draw(|frame| {
        let area = frame.area();
        render_selector(frame, area, pickup.selector_mut(), theme);
    });
}

fn draw_trade(session: &mut TerminalSession, trade: &mut TradeSession, theme: &Theme) {
    let _ = session.terminal_mut().draw(|frame| {
        let area = frame.area();
        render_trade(frame, area, trade, theme);
    });
}
