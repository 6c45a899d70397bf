use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

use num_bigint::BigInt;
use rust_decimal::Decimal;

use crate::{
    ast::statements::Stmt,
    errors::errors::{Error, ErrorImpl},
    Position,
};

/// Static Type
/// The fixed type catalog. There are no user defined types and no list
/// type: a list variable carries the type of its ELEMENTS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Any,
    Nil,
    Comparable,
    Boolean,
    Integer,
    Decimal,
    Character,
    String,
}

impl Type {
    /// Returns the source-level name of the type.
    pub fn name(&self) -> &'static str {
        match self {
            Type::Any => "Any",
            Type::Nil => "Nil",
            Type::Comparable => "Comparable",
            Type::Boolean => "Boolean",
            Type::Integer => "Integer",
            Type::Decimal => "Decimal",
            Type::Character => "Character",
            Type::String => "String",
        }
    }

    /// Returns the Java name the generator emits for the type.
    pub fn jvm_name(&self) -> &'static str {
        match self {
            Type::Any => "Object",
            Type::Nil => "Void",
            Type::Comparable => "Comparable",
            Type::Boolean => "boolean",
            Type::Integer => "int",
            Type::Decimal => "double",
            Type::Character => "char",
            Type::String => "String",
        }
    }

    /// Resolves a source-level type annotation against the catalog.
    ///
    /// # Arguments
    /// * `name` - The annotation text as written.
    /// * `position` - Where to report an unknown type name.
    pub fn from_name(name: &str, position: &Position) -> Result<Type, Error> {
        match name {
            "Any" => Ok(Type::Any),
            "Nil" => Ok(Type::Nil),
            "Comparable" => Ok(Type::Comparable),
            "Boolean" => Ok(Type::Boolean),
            "Integer" => Ok(Type::Integer),
            "Decimal" => Ok(Type::Decimal),
            "Character" => Ok(Type::Character),
            "String" => Ok(Type::String),
            _ => Err(Error::new(
                ErrorImpl::UnknownType {
                    type_: name.to_string(),
                },
                position.clone(),
            )),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Checks that a value of type `actual` may be stored where `target` is
/// expected.
///
/// Assignability is exact: the types are equal, or the target is Any or
/// Comparable. There is no numeric widening and Nil is not assignable
/// to other types.
pub fn require_assignable(target: Type, actual: Type, position: &Position) -> Result<(), Error> {
    if actual == target || target == Type::Any || target == Type::Comparable {
        Ok(())
    } else {
        Err(Error::new(
            ErrorImpl::TypeMatchError {
                expected: target.name().to_string(),
                received: actual.name().to_string(),
            },
            position.clone(),
        ))
    }
}

/// Runtime Value
/// Lists share their cells through the reference counted handle, so
/// cloning a list value produces an alias of the same elements.
#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Boolean(bool),
    Integer(BigInt),
    Decimal(Decimal),
    Character(char),
    String(String),
    List(Rc<RefCell<Vec<Value>>>),
}

impl Value {
    /// Maps the value onto the static type catalog. A list maps onto no
    /// static type.
    pub fn type_of(&self) -> Option<Type> {
        match self {
            Value::Nil => Some(Type::Nil),
            Value::Boolean(_) => Some(Type::Boolean),
            Value::Integer(_) => Some(Type::Integer),
            Value::Decimal(_) => Some(Type::Decimal),
            Value::Character(_) => Some(Type::Character),
            Value::String(_) => Some(Type::String),
            Value::List(_) => None,
        }
    }

    /// Returns the type name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self.type_of() {
            Some(ty) => ty.name(),
            None => "List",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Boolean(left), Value::Boolean(right)) => left == right,
            (Value::Integer(left), Value::Integer(right)) => left == right,
            // Decimal comparison is numeric, so 1.0 equals 1.00.
            (Value::Decimal(left), Value::Decimal(right)) => left == right,
            (Value::Character(left), Value::Character(right)) => left == right,
            (Value::String(left), Value::String(right)) => left == right,
            (Value::List(left), Value::List(right)) => *left.borrow() == *right.borrow(),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "NIL"),
            Value::Boolean(value) => write!(f, "{}", value),
            Value::Integer(value) => write!(f, "{}", value),
            Value::Decimal(value) => write!(f, "{}", value),
            Value::Character(value) => write!(f, "{}", value),
            Value::String(value) => write!(f, "{}", value),
            Value::List(values) => {
                let rendered = values
                    .borrow()
                    .iter()
                    .map(|value| value.to_string())
                    .collect::<Vec<String>>()
                    .join(", ");
                write!(f, "[{}]", rendered)
            }
        }
    }
}

/// Variable Definition
/// A named binding: declared type, mutability and current value.
///
/// The analyzer and the interpreter each build their own instances;
/// the passes share the shape of the scope chain, never the bindings.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub jvm_name: String,
    pub ty: Type,
    pub mutable: bool,
    pub value: Value,
}

/// Native function implementation signature.
pub type NativeFn = fn(Vec<Value>) -> Result<Value, Error>;

/// Function Implementation
/// Either a built-in native function or a user defined body captured
/// together with the scope it was defined in.
#[derive(Debug, Clone)]
pub enum Implementation {
    Native(NativeFn),
    Defined {
        parameters: Vec<String>,
        statements: Rc<Vec<Stmt>>,
        scope: ScopeId,
    },
}

impl PartialEq for Implementation {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Implementation::Native(left), Implementation::Native(right)) => {
                std::ptr::fn_addr_eq(*left, *right)
            }
            (
                Implementation::Defined {
                    statements: left,
                    scope: left_scope,
                    ..
                },
                Implementation::Defined {
                    statements: right,
                    scope: right_scope,
                    ..
                },
            ) => Rc::ptr_eq(left, right) && left_scope == right_scope,
            _ => false,
        }
    }
}

/// Function Definition
/// Identity is the pair (name, arity): same-named functions with
/// different parameter counts coexist.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String,
    pub jvm_name: String,
    pub parameter_types: Vec<Type>,
    pub return_type: Type,
    pub implementation: Implementation,
}

impl Function {
    /// Returns the number of declared parameters.
    pub fn arity(&self) -> usize {
        self.parameter_types.len()
    }
}

/// Scope Identifier
/// An index into the scope arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeId(usize);

/// Scope Record
/// One arena entry: the name lookup tables plus the parent index.
#[derive(Debug, Clone, Default)]
pub struct ScopeRecord {
    parent: Option<ScopeId>,
    variables: HashMap<String, Variable>,
    functions: HashMap<(String, usize), Function>,
}

/// Scope Arena
/// The scope chain stored as a vector of records. Entry and exit are
/// strictly LIFO: exiting a scope truncates the arena back past it, so
/// balanced use never grows the vector across a completed operation.
#[derive(Debug, Clone, Default)]
pub struct Scopes {
    records: Vec<ScopeRecord>,
}

impl Scopes {
    pub fn new() -> Scopes {
        Scopes { records: vec![] }
    }

    /// Returns the root scope, creating its record on first use.
    pub fn root(&mut self) -> ScopeId {
        if self.records.is_empty() {
            self.records.push(ScopeRecord::default());
        }
        ScopeId(0)
    }

    /// Pushes a child record of `parent` and returns its id.
    pub fn enter(&mut self, parent: ScopeId) -> ScopeId {
        self.records.push(ScopeRecord {
            parent: Some(parent),
            variables: HashMap::new(),
            functions: HashMap::new(),
        });
        ScopeId(self.records.len() - 1)
    }

    /// Discards the record `scope` and everything entered after it.
    pub fn exit(&mut self, scope: ScopeId) {
        self.records.truncate(scope.0);
    }

    /// Inserts a variable into the given record, overwriting any
    /// same-named entry.
    pub fn define_variable(&mut self, scope: ScopeId, variable: Variable) {
        self.records[scope.0]
            .variables
            .insert(variable.name.clone(), variable);
    }

    /// Inserts a function into the given record, overwriting any entry
    /// with the same name and arity.
    pub fn define_function(&mut self, scope: ScopeId, function: Function) {
        self.records[scope.0]
            .functions
            .insert((function.name.clone(), function.arity()), function);
    }

    /// Resolves a variable name by walking the parent chain from
    /// `scope`. Returns a clone of the binding; a list value aliases its
    /// cells through the clone.
    pub fn lookup_variable(
        &self,
        scope: ScopeId,
        name: &str,
        position: &Position,
    ) -> Result<Variable, Error> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let record = &self.records[id.0];
            if let Some(variable) = record.variables.get(name) {
                return Ok(variable.clone());
            }
            current = record.parent;
        }

        Err(Error::new(
            ErrorImpl::VariableNotDeclared {
                variable: name.to_string(),
            },
            position.clone(),
        ))
    }

    /// Resolves a function by name and arity, walking the parent chain
    /// from `scope`. A same-named function with a different arity does
    /// not match.
    pub fn lookup_function(
        &self,
        scope: ScopeId,
        name: &str,
        arity: usize,
        position: &Position,
    ) -> Result<Function, Error> {
        let key = (name.to_string(), arity);
        let mut current = Some(scope);
        while let Some(id) = current {
            let record = &self.records[id.0];
            if let Some(function) = record.functions.get(&key) {
                return Ok(function.clone());
            }
            current = record.parent;
        }

        Err(Error::new(
            ErrorImpl::FunctionNotDeclared {
                function: name.to_string(),
                arity,
            },
            position.clone(),
        ))
    }

    /// Replaces the stored value of `name` in place, in whichever record
    /// of the parent chain holds it.
    pub fn set_variable_value(
        &mut self,
        scope: ScopeId,
        name: &str,
        value: Value,
        position: &Position,
    ) -> Result<(), Error> {
        let mut current = Some(scope);
        while let Some(id) = current {
            if let Some(variable) = self.records[id.0].variables.get_mut(name) {
                variable.value = value;
                return Ok(());
            }
            current = self.records[id.0].parent;
        }

        Err(Error::new(
            ErrorImpl::VariableNotDeclared {
                variable: name.to_string(),
            },
            position.clone(),
        ))
    }
}
