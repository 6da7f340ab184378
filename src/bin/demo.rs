use std::error;

use indset_solver::{parse::parse_graph, branch_reduce::find_independent_set};

// Reference instances and the sizes searched on each.
const INSTANCES: [(&str, &[isize]); 5] = [
    ("a:b,c,d; b:a,c; c:a,b; d:a;;", &[2]),
    // Induced path with five vertices.
    ("a:b; b:a,c; c:b,d; d:c,e; e:d;;", &[0, 1, 2, 3, 4]),
    ("a:b,c,d,e,f; b:a,c,f; c:a,b,d,e; d:a,c,e; e:a,c,d,f; f:a,b,e;;", &[2, 3]),
    ("a:;;", &[1]),
    ("a:b,c; b:a,c; c:a,b;;", &[2]),
];

pub fn main() -> Result<(), Box<dyn error::Error>> {
    for (graphstr, ks) in INSTANCES.iter() {
        let graph = parse_graph(graphstr)?;
        println!("{}", graph);
        for &k in ks.iter() {
            let indset = find_independent_set(&graph, k)?;
            println!("indset (k={}): {:?}", k, indset);
        }
    }
    Ok(())
}
