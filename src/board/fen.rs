//! FEN load and save.
//!
//! Only the placement and side-to-move fields are required; castling,
//! en passant and the move counters default to `-`, `-`, `0` and `1`.

use std::str::FromStr;

use super::error::{FenError, MoveError};
use super::types::{Bitboard, CastlingRights, Color, ColoredPiece, Move, Piece, Square};
use super::Board;

/// Standard starting position
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Board {
    /// Parse a board position from FEN notation.
    ///
    /// Rejects malformed fields and positions no legal game can reach in
    /// the ways that would break move generation: missing or extra kings,
    /// pawns on a back rank, or the side not to move standing in check.
    /// Castling flags whose king or rook is not on its home square are dropped.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 2 {
            return Err(FenError::TooFewParts { found: parts.len() });
        }

        let mut board = Board::empty();
        parse_placement(&mut board, parts[0])?;

        board.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        board.castling = parse_castling(parts.get(2).copied().unwrap_or("-"))?;
        board.en_passant =
            parse_en_passant(parts.get(3).copied().unwrap_or("-"), board.side_to_move)?;
        board.halfmove_clock = parse_counter(parts.get(4).copied(), 0)?;
        board.fullmove_number = parse_counter(parts.get(5).copied(), 1)?.max(1);

        validate(&board)?;
        board.drop_unbacked_castling_rights();
        board.hash = board.compute_hash();
        Ok(board)
    }

    /// Parse a board position from FEN notation.
    ///
    /// # Panics
    /// Panics if the FEN string is invalid. Use `try_from_fen` for fallible parsing.
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        Self::try_from_fen(fen).expect("Invalid FEN string")
    }

    /// Convert the board position to FEN notation.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::with_capacity(8);
        for rank in (0..8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8 {
                let piece = Square::new(rank, file).and_then(|sq| self.piece_at(sq));
                if let Some(piece) = piece {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(piece.to_fen_char());
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let active = match self.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };
        let en_passant = self
            .en_passant
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!(
            "{} {} {} {} {} {}",
            rows.join("/"),
            active,
            self.castling,
            en_passant,
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    /// Resolve a long-algebraic move (`e2e4`, `e7e8q`) against the legal moves.
    pub fn parse_move(&self, notation: &str) -> Result<Move, MoveError> {
        if !(4..=5).contains(&notation.len()) || !notation.is_ascii() {
            return Err(MoveError::InvalidLength {
                len: notation.len(),
            });
        }

        let invalid_square = || MoveError::InvalidSquare {
            notation: notation.to_string(),
        };
        let from = Square::from_str(&notation[0..2]).map_err(|_| invalid_square())?;
        let to = Square::from_str(&notation[2..4]).map_err(|_| invalid_square())?;

        let promotion = match notation[4..].chars().next() {
            None => None,
            Some(c) => match Piece::from_char(c) {
                Some(p @ (Piece::Queen | Piece::Rook | Piece::Bishop | Piece::Knight)) => Some(p),
                _ => return Err(MoveError::InvalidPromotion { char: c }),
            },
        };

        self.find_legal_move(from, to, promotion)
            .ok_or_else(|| MoveError::IllegalMove {
                notation: notation.to_string(),
            })
    }
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::try_from_fen(s)
    }
}

fn parse_placement(board: &mut Board, placement: &str) -> Result<(), FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::InvalidRankCount { found: ranks.len() });
    }

    for (row, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - row;
        let mut file = 0usize;
        for c in rank_str.chars() {
            if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                file += skip as usize;
                continue;
            }
            let piece = ColoredPiece::from_fen_char(c).ok_or(FenError::InvalidPiece { char: c })?;
            let sq = Square::new(rank, file).ok_or(FenError::BadRankLength {
                rank: rank + 1,
                files: file + 1,
            })?;
            board.position.create_piece(sq, piece);
            file += 1;
        }
        if file != 8 {
            return Err(FenError::BadRankLength {
                rank: rank + 1,
                files: file,
            });
        }
    }
    Ok(())
}

fn parse_castling(field: &str) -> Result<CastlingRights, FenError> {
    let mut rights = CastlingRights::none();
    if field == "-" {
        return Ok(rights);
    }
    for c in field.chars() {
        match c {
            'K' => rights.set(Color::White, true),
            'Q' => rights.set(Color::White, false),
            'k' => rights.set(Color::Black, true),
            'q' => rights.set(Color::Black, false),
            _ => return Err(FenError::InvalidCastling { char: c }),
        }
    }
    Ok(rights)
}

fn parse_en_passant(field: &str, side_to_move: Color) -> Result<Option<Square>, FenError> {
    if field == "-" {
        return Ok(None);
    }
    let invalid = || FenError::InvalidEnPassant {
        found: field.to_string(),
    };
    let sq = Square::from_str(field).map_err(|_| invalid())?;
    let expected_rank = match side_to_move {
        Color::White => 5,
        Color::Black => 2,
    };
    if sq.rank() != expected_rank {
        return Err(invalid());
    }
    Ok(Some(sq))
}

fn parse_counter(field: Option<&str>, default: u32) -> Result<u32, FenError> {
    match field {
        None => Ok(default),
        Some(s) => s.parse().map_err(|_| FenError::InvalidCounter {
            found: s.to_string(),
        }),
    }
}

fn validate(board: &Board) -> Result<(), FenError> {
    let pos = &board.position;
    let white = pos.pieces(Piece::King, Color::White).popcount();
    let black = pos.pieces(Piece::King, Color::Black).popcount();
    if white != 1 || black != 1 {
        return Err(FenError::KingCount { white, black });
    }

    let back_ranks = Bitboard::RANK_1 | Bitboard::RANK_8;
    if let Some(sq) = (pos.pieces_of_type(Piece::Pawn) & back_ranks).lsb() {
        return Err(FenError::PawnOnBackRank {
            square: sq.to_string(),
        });
    }

    if board.is_in_check(board.side_to_move.opponent()) {
        return Err(FenError::OpponentInCheck);
    }

    if let Some(ep) = board.en_passant {
        // The target is the empty square a pawn of the side not to move just
        // passed over
        let mover = board.side_to_move;
        let pushed = ColoredPiece::new(Piece::Pawn, mover.opponent());
        let victim = ep.offset_rank(-mover.pawn_direction());
        if pos.occupied().contains(ep) || victim.and_then(|sq| board.piece_at(sq)) != Some(pushed) {
            return Err(FenError::InvalidEnPassant {
                found: ep.to_string(),
            });
        }
    }
    Ok(())
}

impl Board {
    fn drop_unbacked_castling_rights(&mut self) {
        for color in Color::BOTH {
            let king_home = if color == Color::White {
                Square::E1
            } else {
                Square::E8
            };
            let king = ColoredPiece::new(Piece::King, color);
            let rook = ColoredPiece::new(Piece::Rook, color);
            for (kingside, corner) in [(true, Square::H1), (false, Square::A1)] {
                let corner = if color == Color::White {
                    corner
                } else {
                    corner.flip_vertical()
                };
                if self.piece_at(king_home) != Some(king) || self.piece_at(corner) != Some(rook) {
                    self.castling.remove(color, kingside);
                }
            }
        }
    }
}
