//! Terminal visualizer for tilesearch.
//!
//! Loads a tile map, runs a search one [`Event`] at a time and paints every
//! state change onto the terminal with crossterm: the active tile in yellow,
//! open tiles in cyan, closed tiles in blue and finally the path in yellow.
//! A fixed delay between steps paces the animation.

use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    cursor, execute,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use log::info;
use tilesearch_core::{Point, TileMap, TileMapError};
use tilesearch_paths::{Event, HeuristicKind, Search, SearchError, SearchOptions, SearchResult};

/// Map used when no `--map` is given.
pub const DEFAULT_MAP: &str = include_str!("../maps/maze.txt");

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Demo settings, parsed from the command line.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "tile-search")]
#[command(about = "Animated A* / Dijkstra on a tile map")]
pub struct DemoConfig {
    /// Tile map file (# wall, . floor, ~ rough, S start, G goal); built-in maze if omitted
    #[arg(long)]
    pub map: Option<PathBuf>,

    /// zero | manhattan | cross-product | octile [default: octile with --diagonals, else manhattan]
    #[arg(long)]
    pub heuristic: Option<HeuristicKind>,

    /// Delay between steps in milliseconds
    #[arg(long = "wait-ms", default_value_t = 100)]
    pub wait_ms: u64,

    /// Tile scale, multiplying edge costs and positions
    #[arg(long, default_value_t = 1.0, value_parser = parse_scale)]
    pub scale: f64,

    /// 8-way movement
    #[arg(long)]
    pub diagonals: bool,

    /// Show the cost so far on opened tiles
    #[arg(long)]
    pub costs: bool,

    /// Do not animate, only print the result
    #[arg(long = "no-color")]
    pub no_color: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            map: None,
            heuristic: None,
            wait_ms: 100,
            scale: 1.0,
            diagonals: false,
            costs: false,
            no_color: false,
        }
    }
}

fn parse_scale(s: &str) -> Result<f64, String> {
    match s.parse::<f64>() {
        Ok(v) if v > 0.0 && v.is_finite() => Ok(v),
        _ => Err(format!("expected a positive number, got {s:?}")),
    }
}

impl DemoConfig {
    #[inline]
    pub fn wait(&self) -> Duration {
        Duration::from_millis(self.wait_ms)
    }

    /// The heuristic to search with.
    ///
    /// Manhattan and cross-product overestimate √2 diagonal steps, so they
    /// are refused on 8-connected maps.
    pub fn heuristic(&self) -> Result<HeuristicKind, DemoError> {
        match (self.heuristic, self.diagonals) {
            (None, true) => Ok(HeuristicKind::Octile),
            (None, false) => Ok(HeuristicKind::Manhattan),
            (Some(kind @ (HeuristicKind::Manhattan | HeuristicKind::CrossProduct)), true) => {
                Err(DemoError::Inadmissible(kind))
            }
            (Some(kind), _) => Ok(kind),
        }
    }

    /// Load and configure the tile map.
    pub fn load_map(&self) -> Result<TileMap, DemoError> {
        let text = match &self.map {
            Some(path) => std::fs::read_to_string(path)?,
            None => DEFAULT_MAP.to_string(),
        };
        let map = TileMap::parse(&text)?
            .with_scale(self.scale)
            .with_diagonals(self.diagonals);
        if map.start().is_none() || map.goal().is_none() {
            return Err(DemoError::MissingMarker);
        }
        Ok(map)
    }
}

/// Errors surfaced by the demo.
#[derive(Debug)]
pub enum DemoError {
    Io(io::Error),
    Map(TileMapError),
    MissingMarker,
    Inadmissible(HeuristicKind),
    Search(SearchError<Point>),
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "i/o error: {e}"),
            Self::Map(e) => write!(f, "{e}"),
            Self::MissingMarker => f.write_str("tile map needs both an S and a G marker"),
            Self::Inadmissible(kind) => write!(
                f,
                "the {kind} heuristic overestimates diagonal steps; use octile or zero with --diagonals"
            ),
            Self::Search(e) => write!(f, "search error: {e}"),
        }
    }
}

impl std::error::Error for DemoError {}

impl From<io::Error> for DemoError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<TileMapError> for DemoError {
    fn from(e: TileMapError) -> Self {
        Self::Map(e)
    }
}

impl From<SearchError<Point>> for DemoError {
    fn from(e: SearchError<Point>) -> Self {
        Self::Search(e)
    }
}

// ---------------------------------------------------------------------------
// Tile view state
// ---------------------------------------------------------------------------

/// How a tile is currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    Wall,
    Floor,
    Rough,
    Open,
    Closed,
    Active,
    Path,
}

impl Paint {
    fn color(self) -> Color {
        match self {
            Paint::Wall => Color::DarkGrey,
            Paint::Floor => Color::Grey,
            Paint::Rough => Color::DarkYellow,
            Paint::Open => Color::Cyan,
            Paint::Closed => Color::Blue,
            Paint::Active | Paint::Path => Color::Yellow,
        }
    }
}

/// Display state of every tile, updated from search events.
#[derive(Debug, Clone)]
pub struct TileView {
    width: i32,
    paint: Vec<Paint>,
    label: Vec<Option<f64>>,
    display_costs: bool,
}

impl TileView {
    pub fn new(map: &TileMap, display_costs: bool) -> Self {
        let paint = map
            .range()
            .iter()
            .map(|p| match (map.is_walkable(p), map.weight(p)) {
                (false, _) => Paint::Wall,
                (true, Some(w)) if w > 1.0 => Paint::Rough,
                (true, _) => Paint::Floor,
            })
            .collect::<Vec<_>>();
        let len = paint.len();
        Self {
            width: map.width(),
            paint,
            label: vec![None; len],
            display_costs,
        }
    }

    #[inline]
    fn idx(&self, p: Point) -> usize {
        (p.y * self.width + p.x) as usize
    }

    pub fn paint_at(&self, p: Point) -> Paint {
        self.paint[self.idx(p)]
    }

    pub fn label_at(&self, p: Point) -> Option<f64> {
        self.label[self.idx(p)]
    }

    /// Apply one event and return the tile it touched.
    pub fn apply(&mut self, ev: &Event<Point>) -> Point {
        let p = ev.node();
        let i = self.idx(p);
        match *ev {
            Event::Active(_) => self.paint[i] = Paint::Active,
            Event::Opened { cost, .. } => {
                self.paint[i] = Paint::Open;
                if self.display_costs {
                    self.label[i] = Some(cost);
                }
            }
            Event::Closed(_) => self.paint[i] = Paint::Closed,
            Event::PathStep(_) => self.paint[i] = Paint::Path,
        }
        p
    }

    /// Terminal columns used per tile.
    #[inline]
    pub fn cell_width(&self) -> u16 {
        if self.display_costs { 4 } else { 2 }
    }

    /// Text drawn for the tile at `p`, padded to the cell width.
    pub fn cell_text(&self, p: Point, marker: Option<char>) -> String {
        let w = self.cell_width() as usize;
        if let Some(ch) = marker {
            return format!("{ch:<w$}");
        }
        match self.label_at(p) {
            Some(cost) => format!("{:>w$}", format_cost(cost), w = w - 1) + " ",
            None => " ".repeat(w),
        }
    }
}

/// Costs shown on tiles: integers without decimals, else one decimal.
pub fn format_cost(cost: f64) -> String {
    if cost.fract() == 0.0 && cost.abs() < 1000.0 {
        format!("{cost:.0}")
    } else {
        format!("{cost:.1}")
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Paints a [`TileView`] onto a terminal writer.
pub struct Painter<W: Write> {
    out: W,
    start: Point,
    goal: Point,
}

impl<W: Write> Painter<W> {
    pub fn new(out: W, start: Point, goal: Point) -> Self {
        Self { out, start, goal }
    }

    fn marker(&self, p: Point) -> Option<char> {
        if p == self.start {
            Some('S')
        } else if p == self.goal {
            Some('G')
        } else {
            None
        }
    }

    /// Draw one tile.
    pub fn draw_tile(&mut self, view: &TileView, p: Point) -> io::Result<()> {
        let col = p.x as u16 * view.cell_width();
        let text = view.cell_text(p, self.marker(p));
        execute!(
            self.out,
            cursor::MoveTo(col, p.y as u16),
            SetBackgroundColor(view.paint_at(p).color()),
            SetForegroundColor(Color::Black),
            Print(text),
            ResetColor
        )
    }

    /// Clear the screen and draw every tile.
    pub fn draw_all(&mut self, view: &TileView, map: &TileMap) -> io::Result<()> {
        execute!(self.out, terminal::Clear(ClearType::All), cursor::Hide)?;
        for p in map.range().iter() {
            self.draw_tile(view, p)?;
        }
        self.out.flush()
    }

    /// Park the cursor under the map and show it again.
    pub fn finish(&mut self, map: &TileMap) -> io::Result<()> {
        execute!(self.out, cursor::MoveTo(0, map.height() as u16 + 1), cursor::Show)?;
        self.out.flush()
    }
}

/// Plain-text rendering of the map with the path drawn as `*`.
pub fn render_ascii(map: &TileMap, path: &[Point]) -> String {
    let mut s = String::new();
    for y in 0..map.height() {
        for x in 0..map.width() {
            let p = Point::new(x, y);
            let ch = if Some(p) == map.start() {
                'S'
            } else if Some(p) == map.goal() {
                'G'
            } else if path.contains(&p) {
                '*'
            } else if !map.is_walkable(p) {
                '#'
            } else if map.weight(p).is_some_and(|w| w > 1.0) {
                '~'
            } else {
                '.'
            };
            s.push(ch);
        }
        s.push('\n');
    }
    s
}

/// Summary printed after a search, one statistic per line.
pub fn summary(kind: HeuristicKind, result: &SearchResult<Point>) -> String {
    let mut s = format!(
        "heuristic: {kind}\nseconds elapsed: {:.6}\nnodes expanded: {}\n",
        result.elapsed_seconds(),
        result.nodes_expanded()
    );
    match result.cost() {
        Some(cost) => {
            s += &format!("path length: {}\npath cost: {}\n", result.path_len(), format_cost(cost));
        }
        None => s += "search failed: no path\n",
    }
    s
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Run the demo described by `cfg`, drawing to `out`.
pub fn run<W: Write>(cfg: &DemoConfig, mut out: W) -> Result<SearchResult<Point>, DemoError> {
    let map = cfg.load_map()?;
    let heuristic = cfg.heuristic()?;
    let (start, goal) = match (map.start(), map.goal()) {
        (Some(s), Some(g)) => (s, g),
        _ => return Err(DemoError::MissingMarker),
    };
    info!(
        "demo: {}x{} map, {} heuristic, {:?} per step",
        map.width(),
        map.height(),
        heuristic,
        cfg.wait()
    );

    let options = SearchOptions {
        collect_path: true,
        emit_events: !cfg.no_color,
    };
    let mut search = Search::new(&map, start, goal, heuristic, options)?;

    if !cfg.no_color {
        let wait = cfg.wait();
        let mut view = TileView::new(&map, cfg.costs);
        let mut painter = Painter::new(&mut out, start, goal);
        painter.draw_all(&view, &map)?;
        while let Some(ev) = search.step()? {
            let p = view.apply(&ev);
            painter.draw_tile(&view, p)?;
            painter.out.flush()?;
            if !wait.is_zero() {
                std::thread::sleep(wait);
            }
        }
        painter.finish(&map)?;
    }

    let result = search.finish()?;
    if cfg.no_color {
        write!(out, "{}", render_ascii(&map, result.path()))?;
    }
    write!(out, "{}", summary(heuristic, &result))?;
    out.flush()?;
    Ok(result)
}
