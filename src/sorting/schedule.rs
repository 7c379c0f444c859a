use crate::sorting::ActivationMap;
use crate::types::Color;

/// One pending ejection: a bead of `color` entered the belt in `column` and
/// reaches its ejector row in `remaining_steps` ticks.
///
/// A command always has `remaining_steps >= 1`; the tick its countdown stands
/// at 1 it is consumed into an activation and removed, whether or not the
/// activation ends up intercepting anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EjectorCommand {
    pub color: Color,
    pub column: usize,
    pub remaining_steps: u32,
}

/**
 * The pending timed commands for every bead still traveling toward its
 * ejector row. Commands are tracked independently and never merge, even for
 * the same color and column; only the derived activation map collapses
 * same-tick duplicates into a single flag.
 */
#[derive(Debug, Clone, Default)]
pub struct EjectorSchedule {
    commands: Vec<EjectorCommand>,
}

impl EjectorSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a command that comes due `travel_distance` ticks from now.
    pub fn schedule(&mut self, color: Color, column: usize, travel_distance: u32) {
        debug_assert!(travel_distance >= 1, "a command must be at least one tick out");

        self.commands.push(EjectorCommand {
            color,
            column,
            remaining_steps: travel_distance,
        });
    }

    /// Advances the schedule by one tick: commands whose countdown stands at
    /// 1 become activations and are removed, all others tick down by one.
    pub fn tick(&mut self, columns: usize) -> ActivationMap {
        let mut activations = ActivationMap::new(columns);

        self.commands.retain_mut(|command| {
            if command.remaining_steps == 1 {
                activations.mark(command.color, command.column);
                false
            } else {
                command.remaining_steps -= 1;
                true
            }
        });

        activations
    }

    /// Returns the commands still counting down.
    pub fn pending(&self) -> &[EjectorCommand] {
        &self.commands
    }

    /// Number of commands still counting down.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` when no commands are pending.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
