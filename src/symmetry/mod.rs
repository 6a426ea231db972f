// Symmetry module: Parsing, rendering and application of crystallographic symmetry operators
// Operators are exact affine maps of Q^3 written in the "x,y,z" grammar of symmetry CIF loops

// ======================== MODULE DECLARATIONS ========================
pub mod equivalent_position;
pub mod tokens;

// Test modules
mod _tests_equivalent_position;

// ======================== EQUIVALENT POSITIONS ========================
pub use equivalent_position::{
    find_reference_identifiers, // fn(lines) -> ReferenceIdentifiers - discovers the identifier triple of a symmetry list
    EquivalentPosition,         // struct - exact affine map (rotation: Matrix3<Ratio<i32>>, translation: Vector3<Ratio<i32>>)
    ReferenceIdentifiers,       // struct - the three identifier labels, defaults ("x", "y", "z")
};

// ======================== VALUE-LINE TOKENIZER ========================
pub use tokens::{
    tokenize,  // fn(input: &str) -> Result<Vec<Token>> - lexes one symmetry value line
    Token,     // struct - (start, end, kind) lexeme span
    TokenKind, // enum - Integer, Identifier, Plus, Minus, Slash, Comma, Semicolon, Whitespace, End
};
