//! PlantUML rendering of a machine definition.
//!
//! The generator is a pure, read-only serializer: output is a deterministic
//! function of the definition's registration order, so re-rendering an
//! unchanged definition reproduces prior output byte-for-byte. The notation
//! targets <https://www.planttext.com> and
//! <http://www.plantuml.com/plantuml/uml/>.
//!
//! Sections appear in a fixed order: header (title, layout direction), one
//! `agent` declaration per state, note blocks grouped by owning state, the
//! initial-state arrow, then transition lines. A transition with no
//! triggers renders as a single structural `--+` edge; otherwise one line
//! per trigger, with `~~>` instead of `-->` when the transition is guarded.
//!
//! State, trigger, and title text is sanitized down to ASCII letters,
//! digits, `.`, `_`, and `-` to keep the notation valid. Note message
//! bodies are emitted verbatim, unsanitized — a known limitation carried
//! over from the notation's block syntax.

use serde::{Deserialize, Serialize};

use crate::core::id::{StateId, TriggerId};
use crate::core::MachineDefinition;

/// Title used when the caller supplies none.
const DEFAULT_TITLE: &str = "UML";

/// Arrow for trigger lines of an unguarded transition.
const ARROW: &str = "-->";

/// Arrow for trigger lines of a guarded transition.
const GUARDED_ARROW: &str = "~~>";

/// Connector for transitions with no triggers.
const STRUCTURAL_CONNECTOR: &str = "--+";

/// Layout direction of the rendered diagram. Defaults to [`LeftToRight`].
///
/// [`LeftToRight`]: UmlDirection::LeftToRight
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UmlDirection {
    #[default]
    LeftToRight,
    TopToBottom,
}

impl UmlDirection {
    fn keyword(self) -> &'static str {
        match self {
            UmlDirection::LeftToRight => "left to right",
            UmlDirection::TopToBottom => "top to bottom",
        }
    }
}

/// Read-only PlantUML serializer over a machine definition.
///
/// Usually reached through [`Machine::uml`]; constructible directly from
/// [`Machine::definition`] when rendering outside the machine.
///
/// [`Machine::uml`]: crate::Machine::uml
/// [`Machine::definition`]: crate::Machine::definition
pub struct UmlGenerator<'a, S: StateId, T: TriggerId> {
    definition: &'a MachineDefinition<S, T>,
}

impl<'a, S: StateId, T: TriggerId> UmlGenerator<'a, S, T> {
    pub fn new(definition: &'a MachineDefinition<S, T>) -> Self {
        UmlGenerator { definition }
    }

    /// Render the definition with the given layout direction and title.
    pub fn render(&self, direction: UmlDirection, title: Option<&str>) -> String {
        let mut out = String::new();
        out.push_str("@startuml\n");
        out.push_str("skin rose\n");
        out.push_str(&format!("title {}\n", self.title(title)));
        out.push_str(&format!("{} direction\n", direction.keyword()));
        self.render_states(&mut out);
        self.render_notes(&mut out);
        self.render_initial(&mut out);
        self.render_transitions(&mut out);
        out.push_str("@enduml");
        out
    }

    fn title(&self, title: Option<&str>) -> String {
        match title {
            Some(title) if !title.is_empty() => sanitize(title),
            _ => DEFAULT_TITLE.to_string(),
        }
    }

    fn render_states(&self, out: &mut String) {
        for state in self.definition.states() {
            out.push_str(&format!("agent {}\n", sanitize(&state.id().to_string())));
        }
    }

    fn render_notes(&self, out: &mut String) {
        for state in self.definition.states() {
            let id = sanitize(&state.id().to_string());
            for note in state.notes() {
                out.push_str(&format!(
                    "note {} of {}\n{}\nend note\n",
                    note.direction().keyword(),
                    id,
                    note.message()
                ));
            }
        }
    }

    fn render_initial(&self, out: &mut String) {
        out.push_str(&format!(
            "Start --> {}\n",
            sanitize(&self.definition.initial_state().id().to_string())
        ));
    }

    fn render_transitions(&self, out: &mut String) {
        for state in self.definition.states() {
            for transition in state.transitions() {
                let source = sanitize(&transition.source().to_string());
                let destination = sanitize(&transition.destination().to_string());
                if transition.triggers().is_empty() {
                    out.push_str(&format!(
                        "{source} {STRUCTURAL_CONNECTOR} {destination}\n"
                    ));
                    continue;
                }
                let arrow = if transition.is_guarded() {
                    GUARDED_ARROW
                } else {
                    ARROW
                };
                for trigger in transition.triggers() {
                    out.push_str(&format!(
                        "{source} {arrow} {destination} : {}\n",
                        sanitize(&trigger.to_string())
                    ));
                }
            }
        }
    }
}

/// Drop every character outside the notation's allow-list: ASCII letters,
/// digits, `.`, `_`, `-`.
fn sanitize(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect()
}
