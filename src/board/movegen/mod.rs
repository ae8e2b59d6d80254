//! Legal move generation.
//!
//! Moves are generated legal from the start rather than filtered after the
//! fact. Before generating, the side's king safety is summarised once
//! ([`Legality`]): squares the enemy covers, the pieces giving check, the
//! squares a non-king move must land on to answer a check, and the pinned
//! pieces with the line each may move along. En passant is the one case
//! checked by playing it out, since removing two pawns from a rank can
//! expose the king in ways pin detection does not see.

mod kings;
mod knights;
mod pawns;
mod sliders;

use super::attack_tables::{
    between, bishop_attacks, king_attacks, knight_attacks, pawn_attacks, ray, rook_attacks,
    Direction,
};
use super::types::{Bitboard, Color, Move, MoveList, Piece, Square, PROMOTION_PIECES};
use super::Board;

/// Which moves a generation pass keeps
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum GenMode {
    All,
    /// Captures, en passant and queen promotions
    Tactical,
}

/// A pinned piece and the line it may still move along
#[derive(Clone, Copy, Debug)]
struct Pin {
    square: Square,
    /// Squares between king and pinner, plus the pinner itself
    line: Bitboard,
}

/// King safety for one side, computed once per generation pass.
#[derive(Clone, Debug)]
pub(crate) struct Legality {
    pub(crate) king: Square,
    /// Squares attacked by the enemy, with our king transparent to sliders
    pub(crate) covered: Bitboard,
    pub(crate) checkers: Bitboard,
    /// Every square when not in check, the checker and the squares
    /// between it and the king under a single check, none under double check
    pub(crate) check_mask: Bitboard,
    pins: [Option<Pin>; 8],
}

impl Legality {
    #[inline]
    pub(crate) fn in_check(&self) -> bool {
        !self.checkers.is_empty()
    }

    #[inline]
    fn double_check(&self) -> bool {
        self.checkers.has_several()
    }

    /// Destinations allowed to the non-king piece on `sq`
    #[inline]
    fn allowed(&self, sq: Square) -> Bitboard {
        self.pins
            .iter()
            .flatten()
            .find(|pin| pin.square == sq)
            .map_or(self.check_mask, |pin| self.check_mask & pin.line)
    }
}

impl Board {
    /// Pieces of `by` attacking `sq` given the occupancy `occupied`.
    pub(crate) fn attackers_to(&self, sq: Square, by: Color, occupied: Bitboard) -> Bitboard {
        let pos = &self.position;
        let diagonal = pos.pieces(Piece::Bishop, by) | pos.pieces(Piece::Queen, by);
        let straight = pos.pieces(Piece::Rook, by) | pos.pieces(Piece::Queen, by);

        (knight_attacks(sq) & pos.pieces(Piece::Knight, by))
            | (king_attacks(sq) & pos.pieces(Piece::King, by))
            | (pawn_attacks(sq, by.opponent()) & pos.pieces(Piece::Pawn, by))
            | (bishop_attacks(sq, occupied) & diagonal)
            | (rook_attacks(sq, occupied) & straight)
    }

    /// Whether any piece of `by` attacks `sq`.
    #[must_use]
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        !self
            .attackers_to(sq, by, self.position.occupied())
            .is_empty()
    }

    /// Whether `side`'s king is attacked.
    #[must_use]
    pub fn is_in_check(&self, side: Color) -> bool {
        let king = self.position.king_square(side);
        self.is_square_attacked(king, side.opponent())
    }

    /// Every square `color` attacks. The opposing king does not block
    /// sliders, so squares behind it along a checking line count as covered.
    #[must_use]
    pub fn covered_squares(&self, color: Color) -> Bitboard {
        let pos = &self.position;
        let occupied = pos.occupied() & !pos.pieces(Piece::King, color.opponent());

        let pawns = pos.pieces(Piece::Pawn, color);
        let mut covered = match color {
            Color::White => pawns.north_east() | pawns.north_west(),
            Color::Black => pawns.south_east() | pawns.south_west(),
        };
        covered |= self.knight_cover(color);
        covered |= self.slider_cover(color, occupied);
        covered |= king_attacks(pos.king_square(color));
        covered
    }

    pub(crate) fn legality(&self, side: Color) -> Legality {
        let pos = &self.position;
        let enemy = side.opponent();
        let king = pos.king_square(side);
        let occupied = pos.occupied();
        let own = pos.color_occupied(side);

        let checkers = self.attackers_to(king, enemy, occupied);
        let check_mask = match checkers.popcount() {
            0 => Bitboard::ALL,
            1 => match checkers.lsb() {
                Some(checker) => checkers | between(king, checker),
                None => Bitboard::ALL,
            },
            _ => Bitboard::EMPTY,
        };

        let diagonal = pos.pieces(Piece::Bishop, enemy) | pos.pieces(Piece::Queen, enemy);
        let straight = pos.pieces(Piece::Rook, enemy) | pos.pieces(Piece::Queen, enemy);
        let mut pins = [None; 8];
        for (slot, dir) in Direction::ALL.into_iter().enumerate() {
            let sliders = if dir.is_diagonal() { diagonal } else { straight };
            let line = ray(king, dir);
            let candidates = line & sliders;
            let nearest = if dir.step() > 0 {
                candidates.lsb()
            } else {
                candidates.msb()
            };
            let Some(pinner) = nearest else { continue };
            let span = between(king, pinner);
            let blockers = span & occupied;
            if blockers.popcount() == 1 && !(blockers & own).is_empty() {
                if let Some(square) = blockers.lsb() {
                    pins[slot] = Some(Pin {
                        square,
                        line: span | Bitboard::from_square(pinner),
                    });
                }
            }
        }

        Legality {
            king,
            covered: self.covered_squares(enemy),
            checkers,
            check_mask,
            pins,
        }
    }

    /// Legal destination squares for the piece on `sq`, as if its owner
    /// were to move.
    ///
    /// # Panics
    ///
    /// Panics if `sq` is empty.
    #[must_use]
    pub fn legal_destinations(&self, sq: Square) -> Bitboard {
        let piece = self
            .position
            .piece_at(sq)
            .unwrap_or_else(|| panic!("legal_destinations: {sq} is empty"));
        let side = piece.color();
        let legality = self.legality(side);
        self.piece_targets(sq, piece.piece(), side, &legality, self.en_passant_for(side))
    }

    /// All legal moves for `side`. When `side` is not to move, the result is
    /// what it could play if it were, without any en passant capture.
    #[must_use]
    pub fn legal_moves(&self, side: Color) -> MoveList {
        self.generate(side, GenMode::All)
    }

    /// All legal moves for the side to move.
    #[must_use]
    pub fn generate_moves(&self) -> MoveList {
        self.generate(self.side_to_move, GenMode::All)
    }

    /// Legal captures and queen promotions for the side to move.
    #[must_use]
    pub fn generate_captures(&self) -> MoveList {
        self.generate(self.side_to_move, GenMode::Tactical)
    }

    /// Side to move is in check and has no legal move.
    #[must_use]
    pub fn is_checkmate(&self) -> bool {
        self.is_in_check(self.side_to_move) && self.generate_moves().is_empty()
    }

    /// Side to move is not in check and has no legal move.
    #[must_use]
    pub fn is_stalemate(&self) -> bool {
        !self.is_in_check(self.side_to_move) && self.generate_moves().is_empty()
    }

    #[inline]
    fn en_passant_for(&self, side: Color) -> Option<Square> {
        if side == self.side_to_move {
            self.en_passant
        } else {
            None
        }
    }

    fn generate(&self, side: Color, mode: GenMode) -> MoveList {
        let mut moves = MoveList::new();
        let legality = self.legality(side);
        let en_passant = self.en_passant_for(side);
        let enemy = self.position.color_occupied(side.opponent());

        for (from, piece) in self.position.iter() {
            if piece.color() != side {
                continue;
            }
            let piece = piece.piece();
            if piece != Piece::King && legality.double_check() {
                continue;
            }
            let mut targets = self.piece_targets(from, piece, side, &legality, en_passant);
            if mode == GenMode::Tactical {
                let mut keep = enemy;
                if piece == Piece::Pawn {
                    keep |= Bitboard::RANK_1 | Bitboard::RANK_8;
                    if let Some(ep) = en_passant {
                        keep.set(ep);
                    }
                }
                targets = targets & keep;
            }
            self.push_moves(from, piece, side, targets, en_passant, mode, &mut moves);
        }
        moves
    }

    fn piece_targets(
        &self,
        sq: Square,
        piece: Piece,
        side: Color,
        legality: &Legality,
        en_passant: Option<Square>,
    ) -> Bitboard {
        match piece {
            Piece::King => self.king_targets(sq, side, legality),
            _ if legality.double_check() => Bitboard::EMPTY,
            Piece::Pawn => self.pawn_targets(sq, side, legality, en_passant),
            Piece::Knight => self.knight_targets(sq, side) & legality.allowed(sq),
            _ => self.slider_targets(sq, piece, side) & legality.allowed(sq),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn push_moves(
        &self,
        from: Square,
        piece: Piece,
        side: Color,
        targets: Bitboard,
        en_passant: Option<Square>,
        mode: GenMode,
        moves: &mut MoveList,
    ) {
        let occupied = self.position.occupied();
        for to in targets.iter() {
            let capture = occupied.contains(to);
            match piece {
                Piece::Pawn if to.rank() == side.opponent().back_rank() => {
                    for promoted in PROMOTION_PIECES {
                        if mode == GenMode::Tactical && !capture && promoted != Piece::Queen {
                            continue;
                        }
                        moves.push(Move::promotion(from, to, promoted, capture));
                    }
                }
                Piece::Pawn if Some(to) == en_passant && !capture => {
                    moves.push(Move::en_passant(from, to));
                }
                Piece::Pawn if from.rank().abs_diff(to.rank()) == 2 => {
                    moves.push(Move::double_pawn_push(from, to));
                }
                Piece::King if from.file().abs_diff(to.file()) == 2 => {
                    if to.file() > from.file() {
                        moves.push(Move::castle_kingside(from, to));
                    } else {
                        moves.push(Move::castle_queenside(from, to));
                    }
                }
                _ if capture => moves.push(Move::capture(from, to)),
                _ => moves.push(Move::quiet(from, to)),
            }
        }
    }
}
