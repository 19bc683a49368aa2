use std::io::{BufRead, Write};

use sapper_core as game;

use crate::input::{Action, InputError, Tokens};

const MINES_PROMPT: &str = "How many mines do you want on the field?";
const TURN_PROMPT: &str = "Set/unset mines marks or claim a cell as free: ";
const LOST_MESSAGE: &str = "You stepped on a mine and failed!";
const WON_MESSAGE: &str = "Congratulations! You found all the mines!";

/// Asks for the mine count, then plays a game with randomly placed mines.
pub(crate) fn play<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    seed: u64,
) -> Result<game::PlayEngine, InputError> {
    let mut tokens = Tokens::new(input);

    write!(output, "{MINES_PROMPT}")?;
    output.flush()?;
    let config = tokens.next_mine_count()?;
    log::debug!("Starting game with {} mines", config.mines);

    let engine = game::PlayEngine::new(config, game::RandomMineGenerator::new(seed));
    run(&mut tokens, output, engine)
}

/// Drives `engine` turn by turn until it is won or lost.
pub(crate) fn run<R, W, G>(
    tokens: &mut Tokens<R>,
    output: &mut W,
    mut engine: game::PlayEngine<G>,
) -> Result<game::PlayEngine<G>, InputError>
where
    R: BufRead,
    W: Write,
    G: game::MineGenerator,
{
    write!(output, "{}", engine.render())?;

    while !engine.is_finished() {
        writeln!(output, "{TURN_PROMPT}")?;
        output.flush()?;

        let command = tokens.next_command()?;
        log::debug!("{} at {:?}", command.action.code(), command.coords);

        match command.action {
            Action::Free => {
                let outcome = engine.reveal(command.coords)?;
                if !outcome.has_update() {
                    log::info!("Cell at {:?} was already revealed", command.coords);
                }
            }
            Action::Mine => {
                engine.toggle_mark(command.coords)?;
            }
        }

        write!(output, "{}", engine.render())?;
    }

    match engine.state() {
        game::EngineState::Lost => writeln!(output, "{LOST_MESSAGE}")?,
        game::EngineState::Won => writeln!(output, "{WON_MESSAGE}")?,
        state => unreachable!("game loop left in state {state:?}"),
    }
    output.flush()?;

    Ok(engine)
}
