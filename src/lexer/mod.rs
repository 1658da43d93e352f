pub mod errors;
pub mod keywords;
pub mod scanner;
pub mod stream;
pub mod tokens;

pub use errors::*;
pub use keywords::*;
pub use scanner::*;
pub use stream::*;
pub use tokens::*;
