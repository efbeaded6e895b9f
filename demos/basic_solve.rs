// Copyright (c) 2016-2022 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//


use bimdf::config::{DeviationLimitKind, DoubleCoverMethod, EveningMode, MatchingSolverKind, SolverConfig};
use bimdf::format;
use bimdf::solve_bimdf;
use bimdf::solvers::bimdf_lower_bound;
use std::error::Error;
use std::io::Write;
use std::path::PathBuf;
use std::result::Result;

use rustop::opts;
use time::OffsetDateTime;

fn main() -> Result<(), Box<dyn Error>> {
    let (args, _) = opts! {
        synopsis "Solve a bidirected minimum deviation flow problem.";
        param file:String, desc:"Instance file name";
        opt round_to_even:bool, desc:"Make the guess even by rounding every edge";
        opt symmetric:bool, desc:"Use the symmetric double cover";
        opt bipartite:bool, desc:"Solve matchings as bipartite min-cost-flows";
        opt edge_limit:bool, desc:"Limit the refinement per edge instead of per node";
        opt no_refinement:bool, desc:"Return the double cover approximation";
        opt max_deviation:i32=5, desc:"Linearization window of the double cover";
        opt refinement_max:i32=2, desc:"Largest refinement window";
        opt lower_bound:bool, desc:"Also compute a lower bound";
        opt verbosity:u32=1, desc:"Verbosity level";
    }
    .parse_or_exit();

    env_logger::init();

    let tstart = OffsetDateTime::now_utc();
    let bimdf = format::read(&args.file)?;
    let tend = OffsetDateTime::now_utc();
    println!("Instance            : {}", args.file);
    println!("Read Time (seconds) : {}", (tend - tstart).as_seconds_f64());
    println!("Number of nodes     : {}", bimdf.num_nodes());
    println!("Number of edges     : {}", bimdf.num_edges());

    let mut config = SolverConfig::default();
    config.verbosity = args.verbosity;
    config.double_cover.verbosity = args.verbosity;
    config.double_cover.max_deviation = args.max_deviation;
    if args.round_to_even {
        config.double_cover.evening_mode = EveningMode::RoundToEven;
    }
    if args.symmetric {
        config.double_cover.method = DoubleCoverMethod::HalfSymmetric;
    }
    if args.bipartite {
        config.matching_solver = MatchingSolverKind::Bipartite;
    }
    if args.edge_limit {
        config.deviation_limit = DeviationLimitKind::EdgeFlow;
    }
    config.refine_with_matching = !args.no_refinement;
    config.refinement_maxdev_max = args.refinement_max.max(config.refinement_maxdev_min);

    let res = solve_bimdf(&bimdf, &config)?;

    println!();
    println!("Cost                : {}", res.cost);
    println!("Components          : {}", res.components.len());
    println!(
        "Collapsed nodes     : {}",
        res.components.iter().map(|c| c.n_collapsed_nodes).sum::<usize>()
    );
    println!(
        "Refinement steps    : {}",
        res.components.iter().map(|c| c.matching.cost_changes.len()).sum::<usize>()
    );
    println!("Time (seconds)      : {:.2}", res.timing.total);

    if args.lower_bound {
        let tstart = OffsetDateTime::now_utc();
        let lb = bimdf_lower_bound(&bimdf, 2)?;
        let tend = OffsetDateTime::now_utc();
        println!("Lower bound         : {}", lb.cost);
        println!("Bound window        : {}", lb.max_deviation);
        println!("Bound time (seconds): {:.2}", (tend - tstart).as_seconds_f64());
    }

    println!();
    println!("Write solution to   : {}.flow", args.file);

    let solfile = PathBuf::from(format!("{}.flow", args.file));
    let f = &mut std::fs::File::create(&solfile)?;
    writeln!(f, "{}", res.cost)?;
    for x in &res.solution {
        writeln!(f, "{}", x)?;
    }

    Ok(())
}
