//! The probe engine: variant selection over the file families, the flipped
//! fallback, and score reconciliation.

use std::path::PathBuf;
use std::sync::Mutex;

use once_cell::sync::Lazy;

use crate::board::{Board, Color, Piece};
use crate::error::ProbeError;
use crate::index::registry::{BishopParity, PawnFileType};
use crate::index::{TABLES, ZIndex};
use crate::material::MbInfo;
use crate::score::Score;
use crate::symmetry::SYMMETRY;
use crate::table::{
    FileCache, HighDtzFile, MAX_FILES, MAX_FILES_HIGH_DTZ, MAX_FILES_YK, MbFile, SCORE_HIGH_DTZ,
    SCORE_UNRESOLVED, TableKey, YkFile, locate,
};

/// Registered table roots. Append-only after startup; probes snapshot it.
static TB_PATHS: Lazy<Mutex<Vec<PathBuf>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Force-build all shared tables. Idempotent; the first probe would do the
/// same work lazily, this just front-loads it.
pub fn init() {
    Lazy::force(&SYMMETRY);
    Lazy::force(&TABLES);
}

/// Register a root directory to search for table files.
pub fn add_path(path: impl Into<PathBuf>) {
    let path = path.into();
    tracing::info!(path = %path.display(), "table root registered");
    TB_PATHS.lock().expect("path list poisoned").push(path);
}

fn tb_paths() -> Vec<PathBuf> {
    TB_PATHS.lock().expect("path list poisoned").clone()
}

/// Per-probe state: the per-side file caches and the reusable block
/// buffers. Contexts are independent; two of them may probe concurrently
/// against the shared tables.
pub struct Context {
    mb: [FileCache<MbFile>; 2],
    high: [FileCache<HighDtzFile>; 2],
    yk: [FileCache<YkFile>; 2],
    cbuf: Vec<u8>,
    bbuf: Vec<u8>,
}

impl Context {
    pub fn new() -> Context {
        Context {
            mb: [FileCache::new(MAX_FILES), FileCache::new(MAX_FILES)],
            high: [
                FileCache::new(MAX_FILES_HIGH_DTZ),
                FileCache::new(MAX_FILES_HIGH_DTZ),
            ],
            yk: [FileCache::new(MAX_FILES_YK), FileCache::new(MAX_FILES_YK)],
            cbuf: Vec::new(),
            bbuf: Vec::new(),
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Context::new()
    }
}

/// Verdict of a single-side table lookup, before reconciliation.
#[derive(Debug, Clone, Copy)]
enum SideScore {
    Dtc(i32),
    Unresolved,
    HighDtzMissing,
}

/// Consult the tables for `board` as-is: every bishop-parity variant, then
/// the pawn-file specializations, then the YK fallback.
fn probe_side(ctx: &mut Context, board: &Board) -> Result<SideScore, ProbeError> {
    // A bare king cannot win; its table would hold nothing but unresolved.
    if board.side_pieces(Color::White) <= 1 {
        return Ok(SideScore::Unresolved);
    }

    let info = MbInfo::from_board(board)?;
    let side = board.side_to_move;
    let ending = locate::ending_name(&info.piece_count);
    let paths = tb_paths();

    let Context {
        mb,
        high,
        yk,
        cbuf,
        bbuf,
    } = ctx;
    let mb = &mut mb[side as usize];
    let high = &mut high[side as usize];
    let yk = &mut yk[side as usize];

    let mut candidates: Vec<(TableKey, ZIndex)> = Vec::new();
    for v in &info.parity_variants {
        if let Some(index) = v.index {
            candidates.push((
                TableKey {
                    counts: info.piece_count,
                    kk_index: info.kk_index,
                    bishop_parity: v.bishop_parity,
                    pawn_file_type: PawnFileType::Free,
                    side,
                },
                index,
            ));
        }
    }
    for v in &info.pawn_variants {
        if let Some(index) = v.index {
            candidates.push((
                TableKey {
                    counts: info.piece_count,
                    kk_index: info.kk_index,
                    bishop_parity: [BishopParity::None; 2],
                    pawn_file_type: v.kind,
                    side,
                },
                index,
            ));
        }
    }

    for (key, index) in &candidates {
        let opened = mb.get_or_open(key, || -> Result<Option<MbFile>, ProbeError> {
            for root in &paths {
                let path = locate::mb_path(
                    root,
                    &ending,
                    key.bishop_parity,
                    key.pawn_file_type,
                    side,
                    key.kk_index,
                    "mb",
                );
                if let Some(file) = MbFile::open(&path)? {
                    return Ok(Some(file));
                }
            }
            Ok(None)
        })?;
        let Some(file) = opened else {
            continue;
        };

        let byte = file.score_byte(*index, cbuf, bbuf)?;
        return match byte {
            SCORE_UNRESOLVED => Ok(SideScore::Unresolved),
            SCORE_HIGH_DTZ => {
                let companion = high.get_or_open(key, || -> Result<Option<HighDtzFile>, ProbeError> {
                    for root in &paths {
                        let path = locate::mb_path(
                            root,
                            &ending,
                            key.bishop_parity,
                            key.pawn_file_type,
                            side,
                            key.kk_index,
                            "hi",
                        );
                        if let Some(file) = HighDtzFile::open(&path)? {
                            return Ok(Some(file));
                        }
                    }
                    Ok(None)
                })?;
                match companion {
                    Some(file) => Ok(SideScore::Dtc(file.score(*index, cbuf, bbuf)?)),
                    None => Ok(SideScore::HighDtzMissing),
                }
            }
            dtc => Ok(SideScore::Dtc(dtc as i32)),
        };
    }

    if !candidates.is_empty() {
        tracing::debug!(%ending, kk = info.kk_index, "no mb file for any variant");
    }

    // Legacy fallback: one monolithic table per ending, king-pair ordinal
    // folded into a flat index over the base zone layout.
    let base = &info.parity_variants[0];
    let Some(base_index) = base.index else {
        return Err(ProbeError::MbFileMissing);
    };
    let yk_key = TableKey {
        counts: info.piece_count,
        kk_index: 0,
        bishop_parity: [BishopParity::None; 2],
        pawn_file_type: PawnFileType::Free,
        side,
    };
    let opened = yk.get_or_open(&yk_key, || -> Result<Option<YkFile>, ProbeError> {
        for root in &paths {
            let path = locate::yk_path(root, &ending, side);
            let overflow = locate::yk_overflow_path(root, &ending, side);
            if let Some(file) = YkFile::open(&path, &overflow)? {
                return Ok(Some(file));
            }
        }
        Ok(None)
    })?;
    let Some(file) = opened else {
        return Err(ProbeError::YkFileMissing);
    };

    let zone = base.row.zone_size();
    let flat = info.kk_index as u64 * zone + base_index;
    let byte = file.score_byte(flat, cbuf, bbuf)?;
    match byte {
        SCORE_UNRESOLVED => Ok(SideScore::Unresolved),
        SCORE_HIGH_DTZ => match file.high_score(info.kk_index, base_index) {
            Ok(v) => Ok(SideScore::Dtc(v)),
            Err(ProbeError::HighDtzMissing) => Ok(SideScore::HighDtzMissing),
            Err(e) => Err(e),
        },
        dtc => Ok(SideScore::Dtc(dtc as i32)),
    }
}

/// Distance sign convention: positive when the probed position's side to
/// move is the winner.
fn signed(n: i32, side_to_move: Color) -> Score {
    match side_to_move {
        Color::White => Score::Dtc(n),
        Color::Black => Score::Dtc(-n),
    }
}

/// Score a position.
///
/// Early outs: a bare king pair draws, as does a lone minor piece; any
/// castling right or a tenth piece is outside the tables. The stronger side
/// is normalized to white before probing so the flipped fallback is rarely
/// needed, and single-sided verdicts reconcile as follows: unresolved on
/// both sides is a draw, unresolved against an unknown flipped table
/// degrades to not-won / not-lost, and errors on both sides yield unknown.
pub fn probe(ctx: &mut Context, board: &Board) -> Score {
    if board.castling != 0 || board.num_pieces as usize > crate::board::MAX_PIECES {
        return Score::Unknown;
    }
    if board.num_pieces == 2 {
        return Score::Draw;
    }
    if board.num_pieces == 3 && !board.pawns_present() {
        let minors: u8 = [Color::White, Color::Black]
            .iter()
            .map(|&c| board.count(c, Piece::Knight) + board.count(c, Piece::Bishop))
            .sum();
        if minors == 1 {
            return Score::Draw;
        }
    }

    let pos = if board.strength[Color::White as usize] < board.strength[Color::Black as usize] {
        board.mirrored()
    } else {
        board.clone()
    };

    let primary = probe_side(ctx, &pos);
    match primary {
        Ok(SideScore::Dtc(n)) => return signed(n, pos.side_to_move),
        Ok(SideScore::HighDtzMissing) => return Score::HighDtzMissing,
        Ok(SideScore::Unresolved) | Err(_) => {}
    }

    // No black material means no flipped database: an unresolved strong
    // side cannot be losing, so the position is drawn.
    if pos.side_pieces(Color::Black) <= 1 {
        return match primary {
            Ok(SideScore::Unresolved) => Score::Draw,
            _ => Score::Unknown,
        };
    }

    let flipped = pos.mirrored();
    let secondary = probe_side(ctx, &flipped);
    let wtm = pos.side_to_move == Color::White;

    match (primary, secondary) {
        (Ok(SideScore::Unresolved), Ok(SideScore::Unresolved)) => Score::Draw,
        (Ok(SideScore::Unresolved), Ok(SideScore::Dtc(n))) => signed(n, flipped.side_to_move),
        (Ok(SideScore::Unresolved), Ok(SideScore::HighDtzMissing)) => Score::HighDtzMissing,
        (Ok(SideScore::Unresolved), Err(e)) => {
            tracing::debug!(error = %e, "flipped probe failed");
            if wtm { Score::NotWon } else { Score::NotLost }
        }
        (Err(_), Ok(SideScore::Dtc(n))) => signed(n, flipped.side_to_move),
        (Err(_), Ok(SideScore::Unresolved)) => {
            if wtm {
                Score::NotLost
            } else {
                Score::NotWon
            }
        }
        (Err(_), Ok(SideScore::HighDtzMissing)) => Score::HighDtzMissing,
        (Err(e1), Err(e2)) => {
            tracing::debug!(primary = %e1, flipped = %e2, "both probes failed");
            Score::Unknown
        }
        (Ok(SideScore::Dtc(_)) | Ok(SideScore::HighDtzMissing), _) => unreachable!(),
    }
}
