use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tabled::{settings::Style, Table, Tabled};
use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt, Registry};

use algolab_analysis::{
    combinations, compare, default_menu, greedy_selection, optimal_selection, simulate_parallel,
    theoretical_probability, DiceReport, MenuItem, Selection, MAX_SUM, MIN_SUM,
};
use algolab_collections::{heap_to_tree, traverse, MinHeap, SinglyLinkedList, TreeNode};
use algolab_core::{Settings, TraversalOrder};
use algolab_graph::{shortest_paths, Graph, GraphDefinition, ShortestPathTree};
use algolab_render::{
    color_gradient, fractal, layout, layout_with_colors, render_dice_comparison, render_fractal,
    render_tree, FRACTAL_STROKE,
};

#[derive(Parser)]
#[command(name = "algolab")]
#[command(about = "AlgoLab CLI - classic data structures, algorithms, and chart rendering", long_about = None)]
#[command(version)]
struct Cli {
    /// Output format (json, pretty)
    #[arg(short, long, global = true, default_value = "pretty")]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true, env = "ALGOLAB_CONFIG")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

#[derive(Subcommand)]
enum Commands {
    /// Singly linked list walkthrough: reverse, merge sort, sorted merge
    Lists,

    /// Draw the Pythagoras-tree fractal to an SVG file
    Fractal {
        /// Recursion depth (recommended 1-12)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(0..=18))]
        level: Option<u32>,

        /// Side of the root square; sized from the canvas when omitted
        #[arg(long)]
        side: Option<f64>,

        /// Output SVG path
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Single-source shortest paths over a weighted graph
    ShortestPath {
        /// Source vertex
        #[arg(short, long, default_value_t = 0)]
        source: usize,

        /// JSON graph definition; the built-in demo networks when omitted
        #[arg(short, long)]
        graph: Option<PathBuf>,
    },

    /// Min-heapify values and render the heap as a tree
    Heap {
        /// Values to heapify
        #[arg(long, value_delimiter = ',', default_values_t = [0i64, 4, 1, 5, 10, 3])]
        values: Vec<i64>,

        /// Output SVG path
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Traverse the demo tree and render the visit order as a gradient
    Traverse {
        /// Traversal order
        #[arg(long, value_enum, default_value = "dfs")]
        order: OrderArg,

        /// Use the larger nine-node demo tree
        #[arg(long)]
        large: bool,

        /// Output SVG path
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Compare greedy and dynamic-programming menu selections
    Menu {
        /// Budgets to evaluate
        #[arg(short, long, value_delimiter = ',', default_values_t = [50u32, 100, 150, 200])]
        budgets: Vec<u32>,
    },

    /// Monte Carlo simulation of two-die sums
    Dice {
        /// Number of rolls; a ladder of sizes when omitted
        #[arg(short, long)]
        trials: Option<u64>,

        /// RNG seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        /// Output SVG path for the comparison chart
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OrderArg {
    Dfs,
    Bfs,
}

impl From<OrderArg> for TraversalOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Dfs => TraversalOrder::Dfs,
            OrderArg::Bfs => TraversalOrder::Bfs,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = Settings::load_or_default(cli.config.as_deref())
        .context("failed to load configuration")?;

    match cli.command {
        Commands::Lists => cmd_lists(cli.output),
        Commands::Fractal { level, side, out } => {
            cmd_fractal(&settings, level, side, out, cli.output)
        }
        Commands::ShortestPath { source, graph } => cmd_shortest_path(source, graph, cli.output),
        Commands::Heap { values, out } => cmd_heap(&settings, values, out, cli.output),
        Commands::Traverse { order, large, out } => {
            cmd_traverse(&settings, order.into(), large, out, cli.output)
        }
        Commands::Menu { budgets } => cmd_menu(&budgets, cli.output),
        Commands::Dice { trials, seed, out } => cmd_dice(&settings, trials, seed, out, cli.output),
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    Registry::default()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .without_time(),
        )
        .init();
}

fn header(text: &str) {
    println!("\n{}", text.bold().cyan());
}

/// Resolves a chart output path and makes sure its directory exists.
fn resolve_out(out: Option<PathBuf>, settings: &Settings, default_name: &str) -> Result<PathBuf> {
    let path = out.unwrap_or_else(|| settings.output_dir.join(default_name));
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output directory {}", parent.display()))?;
        }
    }
    Ok(path)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// lists

#[derive(Serialize)]
struct ListsReport {
    initial: Vec<i64>,
    reversed: Vec<i64>,
    sorted: Vec<i64>,
    merged: Vec<i64>,
}

fn cmd_lists(output: OutputFormat) -> Result<()> {
    let mut list: SinglyLinkedList<i64> = [5i64, 3, 8, 1, 9].into_iter().collect();
    let initial = list.to_vec();

    list.reverse();
    let reversed = list.to_vec();

    list.sort();
    let sorted = list.to_vec();

    let first: SinglyLinkedList<i64> = [1i64, 3, 5].into_iter().collect();
    let second: SinglyLinkedList<i64> = [2i64, 4, 6].into_iter().collect();
    let merged_list = SinglyLinkedList::merge(first, second);
    let merged = merged_list.to_vec();

    if output == OutputFormat::Json {
        return print_json(&ListsReport {
            initial,
            reversed,
            sorted,
            merged,
        });
    }

    header("Singly linked list");
    println!("initial:  {}", join_arrows(&initial));
    println!("reversed: {}", join_arrows(&reversed));
    println!("sorted:   {}", join_arrows(&sorted));
    header("Merging two sorted lists");
    println!("first:    1 -> 3 -> 5");
    println!("second:   2 -> 4 -> 6");
    println!("merged:   {}", merged_list);
    Ok(())
}

fn join_arrows(values: &[i64]) -> String {
    values
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

// ---------------------------------------------------------------------------
// fractal

#[derive(Serialize)]
struct FractalReport {
    level: u32,
    side: f64,
    segments: usize,
    path: PathBuf,
}

fn cmd_fractal(
    settings: &Settings,
    level: Option<u32>,
    side: Option<f64>,
    out: Option<PathBuf>,
    output: OutputFormat,
) -> Result<()> {
    let level = level.unwrap_or(settings.fractal.level);
    if level > 15 {
        println!(
            "{}",
            "warning: levels above 15 produce very large files".yellow()
        );
    }

    let side = side
        .or(settings.fractal.side)
        .unwrap_or_else(|| fractal::initial_side_for(level, f64::from(settings.chart.height)));
    let segments = fractal::generate(level, side);
    let path = resolve_out(out, settings, "pythagoras_tree.svg")?;

    if segments.is_empty() {
        println!("{}", "level 0 draws nothing; no file written".yellow());
        return Ok(());
    }

    render_fractal(
        &segments,
        &format!("Pythagoras tree, level {level}"),
        &path,
        (settings.chart.width, settings.chart.height),
        FRACTAL_STROKE,
    )?;

    let report = FractalReport {
        level,
        side,
        segments: segments.len(),
        path,
    };
    if output == OutputFormat::Json {
        return print_json(&report);
    }

    header("Pythagoras tree");
    println!("level:    {}", report.level);
    println!("side:     {:.1}", report.side);
    println!("segments: {}", report.segments);
    println!("written:  {}", report.path.display().to_string().green());
    Ok(())
}

// ---------------------------------------------------------------------------
// shortest paths

#[derive(Tabled)]
struct PathRow {
    #[tabled(rename = "Vertex")]
    vertex: usize,
    #[tabled(rename = "Distance")]
    distance: String,
    #[tabled(rename = "Path")]
    path: String,
}

#[derive(Serialize)]
struct PathEntry {
    vertex: usize,
    distance: Option<f64>,
    path: Option<Vec<usize>>,
}

#[derive(Serialize)]
struct PathReport {
    network: String,
    source: usize,
    entries: Vec<PathEntry>,
}

fn cmd_shortest_path(
    source: usize,
    graph_file: Option<PathBuf>,
    output: OutputFormat,
) -> Result<()> {
    let networks: Vec<(String, Graph)> = match graph_file {
        Some(path) => {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("reading graph definition {}", path.display()))?;
            let graph = GraphDefinition::from_json(&raw)?.build()?;
            vec![(path.display().to_string(), graph)]
        }
        None => vec![
            ("transport network (directed)".to_string(), demo_network()?),
            (
                "road network (bidirectional)".to_string(),
                demo_road_network()?,
            ),
        ],
    };

    let mut reports = Vec::new();
    for (name, graph) in &networks {
        let tree = shortest_paths(graph, source)?;
        reports.push(path_report(name, graph, &tree));
    }

    if output == OutputFormat::Json {
        return print_json(&reports);
    }

    for report in &reports {
        header(&format!(
            "Shortest paths from vertex {} over the {}",
            report.source, report.network
        ));
        let rows: Vec<PathRow> = report
            .entries
            .iter()
            .map(|entry| PathRow {
                vertex: entry.vertex,
                distance: entry
                    .distance
                    .map_or_else(|| "unreachable".to_string(), |d| format!("{d:.2}")),
                path: entry.path.as_ref().map_or_else(
                    || "-".to_string(),
                    |p| {
                        p.iter()
                            .map(usize::to_string)
                            .collect::<Vec<_>>()
                            .join(" -> ")
                    },
                ),
            })
            .collect();
        println!("{}", Table::new(rows).with(Style::rounded()));
    }
    Ok(())
}

fn path_report(network: &str, graph: &Graph, tree: &ShortestPathTree) -> PathReport {
    let entries = (0..graph.vertex_count())
        .map(|vertex| PathEntry {
            vertex,
            distance: tree.is_reachable(vertex).then(|| tree.distance(vertex)),
            path: tree.path(vertex),
        })
        .collect();
    PathReport {
        network: network.to_string(),
        source: tree.source(),
        entries,
    }
}

/// The six-vertex directed transport network.
fn demo_network() -> Result<Graph> {
    let mut graph = Graph::new(6)?;
    for (from, to, weight) in [
        (0, 1, 4.0),
        (0, 2, 2.0),
        (1, 2, 1.0),
        (1, 3, 5.0),
        (2, 3, 8.0),
        (2, 4, 10.0),
        (3, 4, 2.0),
        (3, 5, 6.0),
        (4, 5, 3.0),
    ] {
        graph.add_edge(from, to, weight)?;
    }
    Ok(graph)
}

/// The five-vertex bidirectional road network.
fn demo_road_network() -> Result<Graph> {
    let mut graph = Graph::new(5)?;
    for (a, b, weight) in [
        (0, 1, 10.0),
        (0, 4, 5.0),
        (1, 2, 1.0),
        (1, 4, 2.0),
        (2, 3, 4.0),
        (3, 0, 7.0),
        (3, 2, 6.0),
        (4, 1, 3.0),
        (4, 2, 9.0),
        (4, 3, 2.0),
    ] {
        graph.add_edge_bidirectional(a, b, weight)?;
    }
    Ok(graph)
}

// ---------------------------------------------------------------------------
// heap

#[derive(Serialize)]
struct HeapReport {
    heap: Vec<i64>,
    path: PathBuf,
}

fn cmd_heap(
    settings: &Settings,
    values: Vec<i64>,
    out: Option<PathBuf>,
    output: OutputFormat,
) -> Result<()> {
    let heap = MinHeap::from_vec(values);
    let Some(tree) = heap_to_tree(heap.as_slice()) else {
        println!("{}", "heap is empty; nothing to draw".yellow());
        return Ok(());
    };

    let path = resolve_out(out, settings, "heap.svg")?;
    render_tree(
        &layout(&tree),
        "Binary min-heap",
        &path,
        (settings.chart.width, settings.chart.height),
    )?;

    let report = HeapReport {
        heap: heap.as_slice().to_vec(),
        path,
    };
    if output == OutputFormat::Json {
        return print_json(&report);
    }

    header("Binary min-heap");
    println!("array form: {:?}", report.heap);
    println!("written:    {}", report.path.display().to_string().green());
    Ok(())
}

// ---------------------------------------------------------------------------
// traversal

#[derive(Serialize)]
struct VisitEntry {
    step: usize,
    value: i64,
    color: String,
}

#[derive(Serialize)]
struct TraversalReport {
    order: TraversalOrder,
    visits: Vec<VisitEntry>,
    path: PathBuf,
}

fn cmd_traverse(
    settings: &Settings,
    order: TraversalOrder,
    large: bool,
    out: Option<PathBuf>,
    output: OutputFormat,
) -> Result<()> {
    let tree = if large {
        larger_demo_tree()
    } else {
        demo_tree()
    };

    let visited = traverse(&tree, order);
    let colors = color_gradient(visited.len());
    let overrides: HashMap<_, _> = visited
        .iter()
        .zip(&colors)
        .map(|(node, color)| (node.id, *color))
        .collect();

    let title = match order {
        TraversalOrder::Dfs => "Depth-first traversal",
        TraversalOrder::Bfs => "Breadth-first traversal",
    };
    let path = resolve_out(out, settings, &format!("traversal_{order}.svg"))?;
    render_tree(
        &layout_with_colors(&tree, &overrides),
        title,
        &path,
        (settings.chart.width, settings.chart.height),
    )?;

    let report = TraversalReport {
        order,
        visits: visited
            .iter()
            .zip(&colors)
            .enumerate()
            .map(|(i, (node, color))| VisitEntry {
                step: i + 1,
                value: node.value,
                color: color.to_hex(),
            })
            .collect(),
        path,
    };
    if output == OutputFormat::Json {
        return print_json(&report);
    }

    header(title);
    println!("visit order (dark to light):");
    for visit in &report.visits {
        println!("  {}. value {} ({})", visit.step, visit.value, visit.color);
    }
    println!("written: {}", report.path.display().to_string().green());
    Ok(())
}

//       0
//      / \
//     4   1
//    / \  /
//   5  10 3
fn demo_tree() -> TreeNode {
    TreeNode::new(0)
        .with_left(
            TreeNode::new(4)
                .with_left(TreeNode::new(5))
                .with_right(TreeNode::new(10)),
        )
        .with_right(TreeNode::new(1).with_left(TreeNode::new(3)))
}

fn larger_demo_tree() -> TreeNode {
    TreeNode::new(1)
        .with_left(
            TreeNode::new(2)
                .with_left(
                    TreeNode::new(4)
                        .with_left(TreeNode::new(8))
                        .with_right(TreeNode::new(9)),
                )
                .with_right(TreeNode::new(5)),
        )
        .with_right(
            TreeNode::new(3)
                .with_left(TreeNode::new(6))
                .with_right(TreeNode::new(7)),
        )
}

// ---------------------------------------------------------------------------
// menu

#[derive(Tabled)]
struct MenuRow {
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Cost")]
    cost: u32,
    #[tabled(rename = "Calories")]
    calories: u32,
    #[tabled(rename = "Cal/Cost")]
    ratio: String,
}

#[derive(Tabled)]
struct SelectionRow {
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Qty")]
    quantity: u32,
    #[tabled(rename = "Cost")]
    cost: u32,
    #[tabled(rename = "Calories")]
    calories: u32,
}

#[derive(Serialize)]
struct BudgetComparison {
    budget: u32,
    greedy: Selection,
    optimal: Selection,
}

fn cmd_menu(budgets: &[u32], output: OutputFormat) -> Result<()> {
    let menu = default_menu();
    let mut comparisons = Vec::new();
    for &budget in budgets {
        comparisons.push(BudgetComparison {
            budget,
            greedy: greedy_selection(&menu, budget)?,
            optimal: optimal_selection(&menu, budget)?,
        });
    }

    if output == OutputFormat::Json {
        return print_json(&comparisons);
    }

    header("Menu");
    let menu_rows: Vec<MenuRow> = menu
        .iter()
        .map(|item| MenuRow {
            item: item.name.clone(),
            cost: item.cost,
            calories: item.calories,
            ratio: format!("{:.2}", item.calorie_ratio()),
        })
        .collect();
    println!("{}", Table::new(menu_rows).with(Style::rounded()));

    for comparison in &comparisons {
        header(&format!("Budget {}", comparison.budget));
        print_selection("greedy", &comparison.greedy, &menu, comparison.budget);
        print_selection(
            "dynamic programming",
            &comparison.optimal,
            &menu,
            comparison.budget,
        );

        let greedy = comparison.greedy.total_calories;
        let optimal = comparison.optimal.total_calories;
        let verdict = match optimal.cmp(&greedy) {
            std::cmp::Ordering::Greater => format!(
                "dynamic programming wins by {} calories ({:.1}%)",
                optimal - greedy,
                f64::from(optimal - greedy) / f64::from(greedy.max(1)) * 100.0
            ),
            std::cmp::Ordering::Less => format!(
                "greedy wins by {} calories ({:.1}%)",
                greedy - optimal,
                f64::from(greedy - optimal) / f64::from(optimal.max(1)) * 100.0
            ),
            std::cmp::Ordering::Equal => "both methods tie".to_string(),
        };
        println!("{}", verdict.green());
    }
    Ok(())
}

fn print_selection(label: &str, selection: &Selection, menu: &[MenuItem], budget: u32) {
    println!("{}", label.bold());
    if selection.is_empty() {
        println!("  nothing fits the budget");
        return;
    }
    let rows: Vec<SelectionRow> = selection
        .quantities
        .iter()
        .filter_map(|(name, &quantity)| {
            menu.iter().find(|item| &item.name == name).map(|item| SelectionRow {
                item: name.clone(),
                quantity,
                cost: item.cost * quantity,
                calories: item.calories * quantity,
            })
        })
        .collect();
    println!("{}", Table::new(rows).with(Style::rounded()));
    println!(
        "  total cost {}, total calories {}, leftover {}",
        selection.total_cost,
        selection.total_calories,
        budget - selection.total_cost
    );
}

// ---------------------------------------------------------------------------
// dice

#[derive(Tabled)]
struct TheoreticalRow {
    #[tabled(rename = "Sum")]
    sum: u8,
    #[tabled(rename = "Combinations")]
    combinations: String,
    #[tabled(rename = "Probability")]
    probability: String,
    #[tabled(rename = "Percent")]
    percent: String,
}

#[derive(Tabled)]
struct DiceTableRow {
    #[tabled(rename = "Sum")]
    sum: u8,
    #[tabled(rename = "Simulated")]
    simulated: String,
    #[tabled(rename = "Theoretical")]
    theoretical: String,
    #[tabled(rename = "Abs dev")]
    abs_error: String,
    #[tabled(rename = "Rel dev")]
    relative: String,
}

#[derive(Serialize)]
struct DiceRunReport {
    reports: Vec<DiceReport>,
    chart: PathBuf,
}

fn cmd_dice(
    settings: &Settings,
    trials: Option<u64>,
    seed: Option<u64>,
    out: Option<PathBuf>,
    output: OutputFormat,
) -> Result<()> {
    let seed = seed.or(settings.dice.seed);
    let ladder: Vec<u64> = match trials {
        Some(t) => vec![t],
        None => vec![1_000, 10_000, 100_000, settings.dice.trials],
    };

    if output == OutputFormat::Pretty {
        header("Analytic distribution of two-die sums");
        let rows: Vec<TheoreticalRow> = (MIN_SUM..=MAX_SUM)
            .map(|sum| {
                let probability = theoretical_probability(sum);
                TheoreticalRow {
                    sum,
                    combinations: format!("{}/36", combinations(sum)),
                    probability: format!("{probability:.6}"),
                    percent: format!("{:.2}%", probability * 100.0),
                }
            })
            .collect();
        println!("{}", Table::new(rows).with(Style::rounded()));
    }

    let progress = ProgressBar::new(ladder.iter().sum());
    progress.set_style(
        ProgressStyle::with_template("{spinner} rolling dice [{bar:40}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut reports = Vec::new();
    for &size in &ladder {
        let tally = simulate_parallel(size, seed);
        progress.inc(size);
        reports.push(compare(&tally));
    }
    progress.finish_and_clear();

    let chart_path = resolve_out(out, settings, "dice_comparison.svg")?;
    let final_report = reports.last().context("no simulation ran")?;
    render_dice_comparison(
        final_report,
        &chart_path,
        (settings.chart.width, settings.chart.height),
    )?;

    if output == OutputFormat::Json {
        return print_json(&DiceRunReport {
            reports,
            chart: chart_path,
        });
    }

    for report in &reports {
        header(&format!("Monte Carlo, {} rolls", report.trials));
        let rows: Vec<DiceTableRow> = report
            .rows
            .iter()
            .map(|row| DiceTableRow {
                sum: row.sum,
                simulated: format!("{:.2}% ({:.6})", row.simulated * 100.0, row.simulated),
                theoretical: format!(
                    "{:.2}% ({:.6})",
                    row.theoretical * 100.0,
                    row.theoretical
                ),
                abs_error: format!("{:.3}%", row.abs_error * 100.0),
                relative: format!("{:.2}%", row.relative_error_pct),
            })
            .collect();
        println!("{}", Table::new(rows).with(Style::rounded()));
        println!(
            "mean absolute deviation: {:.4}%",
            report.mean_abs_error * 100.0
        );
    }
    println!("chart: {}", chart_path.display().to_string().green());
    Ok(())
}
