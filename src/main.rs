#![allow(non_snake_case)]
use RustedCalcGraph::Utils::plots::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use RustedCalcGraph::pipeline::run_batch;
use log::info;
use simplelog::*;

fn main() {
    let logger_instance = CombinedLogger::init(vec![TermLogger::new(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
    match logger_instance {
        Ok(()) => {
            info!("logging initialized");
        }
        Err(e) => {
            println!("failed to initialize logging: {}", e);
        }
    }

    // a few expressions exercising the polynomial, trigonometric,
    // exponential and singular cases plus one with no closed-form integral
    let inputs = [
        "x**2",
        "sin(x)",
        "exp(x)",
        "x**3 - 3*x**2 + 2*x",
        "1/x",
        "exp(x**2)",
    ];

    println!("Calculus graphing calculator");
    println!("============================");
    for (i, outcome) in run_batch(&inputs).into_iter().enumerate() {
        println!("\nFunction: {}", outcome.input);
        match outcome.result {
            Ok(graph) => {
                println!("  Derivative: {}", graph.derivative);
                println!("  Integral:   {}", graph.integral);
                let filename = format!("calc_graph_{}.png", i);
                match graph.chart.save_to_png(&filename, DEFAULT_WIDTH, DEFAULT_HEIGHT) {
                    Ok(()) => println!("  Chart saved to {}", filename),
                    Err(e) => println!("  Chart rendering failed: {}", e),
                }
            }
            Err(e) => {
                println!("  Failed: {}", e);
            }
        }
    }
}
