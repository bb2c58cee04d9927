use crate::args::Arg;

use super::printf::{pieces, Piece};

/// Argument positions that render as flattened attributes instead of scalars.
///
/// Every directive except `%%` consumes one argument position. A position is
/// recorded when its directive is the generic `%v` and the argument at that
/// position is structured. Positions past the end of `args` are ignored.
pub fn attribute_indices(text: &str, args: &[Arg]) -> Vec<usize> {
    let mut indices = Vec::new();
    if args.is_empty() {
        return indices;
    }

    let mut position = 0;
    for piece in pieces(text) {
        let Piece::Directive(directive) = piece else { continue };
        if directive.is_generic() && args.get(position).is_some_and(Arg::is_structured) {
            indices.push(position);
        }
        position += 1;
    }
    indices
}
