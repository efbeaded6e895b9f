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


use bimdf::{solve_bimdf, BiMdf, CostFunction, EdgeInfo, SolverConfig};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut bimdf = BiMdf::new();
    let x = bimdf.add_node(0);
    let a = bimdf.add_node(0);
    let b = bimdf.add_node(0);
    let c = bimdf.add_node(0);

    let x_x = bimdf.add(EdgeInfo::new(x, x, false, false));
    let x_a = bimdf.add(EdgeInfo {
        cost_function: CostFunction::quad_deviation(4.0, 1.0),
        lower: 1,
        ..EdgeInfo::new(x, a, true, true)
    });
    let a_b = bimdf.add(EdgeInfo {
        cost_function: CostFunction::abs_deviation(0.7, 1.0),
        ..EdgeInfo::new(a, b, false, false)
    });
    let a_c = bimdf.add(EdgeInfo {
        cost_function: CostFunction::abs_deviation(0.4, 1.0),
        ..EdgeInfo::new(a, c, false, false)
    });
    let b_c = bimdf.add(EdgeInfo {
        cost_function: CostFunction::abs_deviation(0.2, 1.0),
        ..EdgeInfo::new(b, c, true, true)
    });

    let res = solve_bimdf(&bimdf, &SolverConfig::default())?;

    println!("Cost                : {}", res.cost);
    for (name, e) in &[("x_x", x_x), ("x_a", x_a), ("a_b", a_b), ("a_c", a_c), ("b_c", b_c)] {
        println!("Flow {:<15}: {}", name, res.solution[*e]);
    }
    println!("Time (seconds)      : {:.4}", res.timing.total);

    Ok(())
}
