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


mod common;

use std::collections::HashMap;
use std::error::Error;
use std::fs::{read_dir, read_to_string};
use std::path::Path;

use bimdf::config::MatchingSolverKind;
use bimdf::format;
use bimdf::solve_bimdf;

#[test]
fn test_instances() -> Result<(), Box<dyn Error>> {
    common::init_logger();
    let mut values = HashMap::new();

    for entry in read_dir(Path::new("tests/bimdf"))? {
        let entry = entry?;
        if entry.path().extension().map(|ext| ext == "sol").unwrap_or(false) {
            let value: f64 = read_to_string(entry.path())?.trim().parse()?;
            if let Some(file_stem) = entry.path().file_stem().map(|s| s.to_string_lossy().to_string()) {
                values.insert(file_stem, value);
            }
        }
    }

    let mut n_instances = 0;
    for entry in read_dir(Path::new("tests/bimdf"))? {
        let entry = entry?;
        if entry.path().extension().map(|ext| ext == "bimdf").unwrap_or(false) {
            let bimdf = format::read(&entry.path().to_string_lossy())?;
            let value = match entry
                .path()
                .file_stem()
                .and_then(|s| values.get(s.to_string_lossy().as_ref()))
            {
                Some(&value) => value,
                None => panic!("Can't find solution file for {:?}", entry.path()),
            };

            let res = solve_bimdf(&bimdf, &common::config())?;
            assert!(bimdf.is_valid(&res.solution));
            assert!(
                (res.cost - value).abs() < 1e-9,
                "{:?}: {} != {}",
                entry.path(),
                res.cost,
                value
            );
            n_instances += 1;
        }
    }
    assert_eq!(n_instances, values.len());

    Ok(())
}

#[test]
fn test_bipartite_instance() -> Result<(), Box<dyn Error>> {
    // a directed cycle, its matching problem is bipartite
    let bimdf = format::read("tests/bimdf/cycle_sum.bimdf")?;
    let mut config = common::config();
    config.matching_solver = MatchingSolverKind::Bipartite;
    let res = solve_bimdf(&bimdf, &config)?;
    assert_eq!(res.cost, 5.0);
    assert!(res.solution[0] == 3 || res.solution[0] == 4);
    assert!(res.solution.iter().all(|&x| x == res.solution[0]));
    Ok(())
}
