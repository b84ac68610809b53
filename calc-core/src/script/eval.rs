//! # 求值器
//!
//! 递归地将表达式树归约为一个数值。
//!
//! ## 设计原则
//!
//! - 求值是**无副作用**的纯函数
//! - 先求所有子节点（后序），再按运算类型从左到右归约
//! - 错误不在内部吞掉，以 [`EvalError`] 返回给调用方

use crate::error::EvalError;

use super::ast::{Node, Operation, OperationKind};

/// 对表达式树求值
pub fn evaluate(node: &Node) -> Result<f64, EvalError> {
    match node {
        Node::Number(value) => Ok(*value),
        Node::Operation(op) => evaluate_operation(op),
    }
}

fn evaluate_operation(op: &Operation) -> Result<f64, EvalError> {
    let values = op
        .children()
        .iter()
        .map(evaluate)
        .collect::<Result<Vec<f64>, EvalError>>()?;

    let Some((&first, rest)) = values.split_first() else {
        return Err(EvalError::InvalidOperation {
            message: format!("运算 {} 没有操作数", op.kind()),
        });
    };

    match op.kind() {
        OperationKind::Sum => Ok(values.iter().sum()),
        OperationKind::Subtract => Ok(rest.iter().fold(first, |acc, v| acc - v)),
        OperationKind::Multiply => Ok(values.iter().product()),
        OperationKind::Divide => rest.iter().try_fold(first, |acc, &v| {
            if v == 0.0 {
                Err(EvalError::DivisionByZero)
            } else {
                Ok(acc / v)
            }
        }),
        OperationKind::Mod => rest.iter().try_fold(first, |acc, &v| {
            if v == 0.0 {
                Err(EvalError::DivisionByZero)
            } else {
                Ok(acc % v)
            }
        }),
        OperationKind::Power => rest.iter().try_fold(first, |acc, &v| checked_pow(acc, v)),
        OperationKind::Root => match rest.first() {
            None => {
                if first < 0.0 {
                    Err(EvalError::DomainError {
                        message: format!("负数 {first} 不能开平方"),
                    })
                } else {
                    Ok(first.sqrt())
                }
            }
            Some(&radicand) => {
                if first == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                checked_pow(radicand, 1.0 / first)
            }
        },
        OperationKind::Inverse => {
            if first == 0.0 {
                Err(EvalError::DivisionByZero)
            } else {
                Ok(1.0 / first)
            }
        }
    }
}

/// 幂运算
///
/// 0 的负数次幂视为除零；负底数的分数次幂没有实数结果。
fn checked_pow(base: f64, exponent: f64) -> Result<f64, EvalError> {
    if base == 0.0 && exponent < 0.0 {
        return Err(EvalError::DivisionByZero);
    }
    let result = base.powf(exponent);
    if result.is_nan() && !base.is_nan() && !exponent.is_nan() {
        return Err(EvalError::DomainError {
            message: format!("{base} 的 {exponent} 次幂不是实数"),
        });
    }
    Ok(result)
}
