use std::io::prelude::*;
use std::mem;
use std::str::FromStr;
use crate::cust_errors::ImportError;
use crate::graph::Graph;

enum ParserState {
    Initial, // Expecting a new vertex or the final `;`.
    Vertex, // Reading a vertex name until `:`.
    Neighbor, // Reading neighbor names until `;`.
}

/// Parses a graph of the form `a:b,c; b:a; c:a;;`.
///
/// Spaces are ignored everywhere, identifiers are alphanumeric. Malformed input is rejected:
/// unexpected characters, empty neighbor names, a missing final `;` and anything but spaces
/// after it. The result has to be a valid undirected graph, see `Graph::from_adjacency`.
pub fn parse_graph(graphstr: &str) -> Result<Graph, ImportError> {
    let mut entries: Vec<(String, Vec<String>)> = Vec::new();
    let mut parser_state = ParserState::Initial;
    let mut vertex_name = String::new();
    let mut neighbor_name = String::new();
    let mut neighbors = Vec::new();
    let mut after_comma = false;
    let mut finished = false;
    for (pos, c) in graphstr.char_indices() {
        if c == ' ' {
            continue
        }
        if finished {
            return Err(ImportError::TrailingInput(pos))
        }
        match parser_state {
            ParserState::Initial => {
                if c.is_alphanumeric() {
                    vertex_name.push(c);
                    parser_state = ParserState::Vertex;
                } else if c == ';' {
                    finished = true;
                } else {
                    return Err(ImportError::UnexpectedChar(c, pos))
                }
            },
            ParserState::Vertex => {
                if c.is_alphanumeric() {
                    vertex_name.push(c);
                } else if c == ':' {
                    parser_state = ParserState::Neighbor;
                } else {
                    return Err(ImportError::UnexpectedChar(c, pos))
                }
            },
            ParserState::Neighbor => {
                if c.is_alphanumeric() {
                    neighbor_name.push(c);
                } else if c == ',' || c == ';' {
                    if neighbor_name.is_empty() {
                        // `a:;` is an empty neighbor list, `a:,` and `a:b,;` are not.
                        if c == ',' || after_comma {
                            return Err(ImportError::EmptyIdentifier(pos))
                        }
                    } else {
                        neighbors.push(mem::take(&mut neighbor_name));
                    }
                    after_comma = c == ',';
                    if c == ';' {
                        entries.push((mem::take(&mut vertex_name), mem::take(&mut neighbors)));
                        parser_state = ParserState::Initial;
                    }
                } else {
                    return Err(ImportError::UnexpectedChar(c, pos))
                }
            },
        }
    }
    if !finished {
        return Err(ImportError::UnterminatedInput)
    }
    Ok(Graph::from_adjacency(&entries)?)
}

impl FromStr for Graph {
    type Err = ImportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_graph(s)
    }
}

// Reading graphs
impl Graph {
    /// Reads a graph in textual form. Lines are joined with a space, so entries may be spread
    /// over several lines.
    pub fn read_graph<R: BufRead>(gr: R) -> Result<Self, ImportError> {
        let lines = gr.lines().collect::<Result<Vec<_>, _>>()?;
        parse_graph(&lines.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cust_errors::GraphError;
    use std::io::Cursor;

    #[test]
    fn parse_graph_test() {
        let g = parse_graph("a:b,c,d; b:a,c; c:a,b; d:a;;").unwrap();
        assert_eq!(g.vertices().collect::<Vec<_>>(), vec!["a", "b", "c", "d"]);
        assert_eq!(g.neighbors("a"), Ok(vec!["b", "c", "d"]));
        assert_eq!(g.to_string(), "a:b,c,d; b:a,c; c:a,b; d:a;;");
        let g = parse_graph("  x1 : y2 ,z3;y2:x1 ;z3:x1; ; ").unwrap();
        assert_eq!(g.to_string(), "x1:y2,z3; y2:x1; z3:x1;;");
        let g = parse_graph("a:;;").unwrap();
        assert_eq!(g.vertex_count(), 1);
        assert_eq!(g.edge_count(), 0);
        assert_eq!(parse_graph(";").unwrap().vertex_count(), 0);
    }

    #[test]
    fn round_trip_test() {
        for text in &["a:b,c,d; b:a,c; c:a,b; d:a;;",
                      "a:b; b:a,c; c:b,d; d:c,e; e:d;;",
                      "a:b,c,d,e,f; b:a,c,f; c:a,b,d,e; d:a,c,e; e:a,c,d,f; f:a,b,e;;",
                      "a:;;",
                      ";"] {
            let g = parse_graph(text).unwrap();
            assert_eq!(parse_graph(&g.to_string()).unwrap(), g);
            assert_eq!(&g.to_string(), text);
        }
        let mut g = parse_graph("a:b,c; b:a; c:a; d:;;").unwrap();
        g.remove_vertex("a").unwrap();
        assert_eq!(parse_graph(&g.to_string()).unwrap(), g);
    }

    #[test]
    fn malformed_input_test() {
        assert!(matches!(parse_graph("a:b; b:a;"), Err(ImportError::UnterminatedInput)));
        assert!(matches!(parse_graph(""), Err(ImportError::UnterminatedInput)));
        assert!(matches!(parse_graph("a:b; b:a"), Err(ImportError::UnterminatedInput)));
        assert!(matches!(parse_graph("a-b:;;"), Err(ImportError::UnexpectedChar('-', 1))));
        assert!(matches!(parse_graph("a;;"), Err(ImportError::UnexpectedChar(';', 1))));
        assert!(matches!(parse_graph("a:b:;;"), Err(ImportError::UnexpectedChar(':', 3))));
        assert!(matches!(parse_graph("a:,b; b:a;;"), Err(ImportError::EmptyIdentifier(2))));
        assert!(matches!(parse_graph("a:b,; b:a;;"), Err(ImportError::EmptyIdentifier(4))));
        assert!(matches!(parse_graph("a:;; b:;"), Err(ImportError::TrailingInput(5))));
        assert!(matches!(parse_graph("a:; a:;;"), Err(ImportError::InvalidGraph(GraphError::DuplicateVertex(_)))));
        assert!(matches!(parse_graph("a:b;;"), Err(ImportError::InvalidGraph(GraphError::UnknownVertex(_)))));
        assert!(matches!(parse_graph("a:b; b:;;"), Err(ImportError::InvalidGraph(GraphError::AsymmetricEdge(_, _)))));
        assert!(matches!(parse_graph("a:b,b; b:a;;"), Err(ImportError::InvalidGraph(GraphError::DuplicateEdge(_, _)))));
    }

    #[test]
    fn from_str_test() {
        let g: Graph = "a:b; b:a;;".parse().unwrap();
        assert_eq!(g.degree("a"), Ok(1));
        assert!("a:b".parse::<Graph>().is_err());
    }

    #[test]
    fn read_graph_test() {
        let gr = Cursor::new("a:b,c;\nb:a;\nc:a;\n;\n");
        let g = Graph::read_graph(gr);
        assert!(g.is_ok());
        let g = g.unwrap();
        assert_eq!(g.to_string(), "a:b,c; b:a; c:a;;");
        let gr = Cursor::new("a:b;\n");
        assert!(Graph::read_graph(gr).is_err());
    }
}
