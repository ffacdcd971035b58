//! Backend do cliente: armazenamento (API REST ou memória), cache local com
//! indicadores de carregamento/erro e controladores dos formulários.
//! Todas as escritas passam pelo armazenamento e terminam numa releitura.

#[allow(dead_code)]
pub mod controller;
pub mod http;
pub mod memory;
#[allow(dead_code)]
pub mod state;
pub mod store;
