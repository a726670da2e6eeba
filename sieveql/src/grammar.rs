use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "sieveql.pest"]
pub struct SieveqlParser;
